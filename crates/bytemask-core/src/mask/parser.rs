use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::layout;
use super::reader::{MaskReader, split_trimmed};
use crate::extract::{Endianness, decode_field};

/// One named, inclusive byte range parsed from a mask string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl FieldSpec {
    /// Decode this field from `payload`; see [`decode_field`].
    pub fn decode(&self, payload: &[u8], endianness: Endianness) -> i64 {
        decode_field(payload, self.start_byte, self.end_byte, endianness)
    }
}

/// Parse a mask string into field specs, in token order.
///
/// Stops at the first malformed token. Duplicate names are kept.
///
/// # Examples
/// ```
/// use bytemask_core::parse_mask;
///
/// let fields = parse_mask("id:0-1, flags : 2 - 2").unwrap();
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].name, "flags");
/// assert_eq!((fields[1].start_byte, fields[1].end_byte), (2, 2));
/// ```
///
/// # Errors
/// Returns the [`ParseError`] for the first token that fails.
pub fn parse_mask(mask: &str) -> Result<Vec<FieldSpec>, ParseError> {
    MaskReader::new(mask).tokens().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<FieldSpec, ParseError> {
    let (name, range) =
        split_trimmed(token, layout::NAME_SEPARATOR).ok_or_else(|| ParseError::MissingColon {
            token: token.to_string(),
        })?;
    if name.is_empty() {
        return Err(ParseError::EmptyName {
            token: token.to_string(),
        });
    }

    let (start_byte, end_byte) = parse_range(range)?;
    Ok(FieldSpec {
        name: name.to_string(),
        start_byte,
        end_byte,
    })
}

fn parse_range(range: &str) -> Result<(usize, usize), ParseError> {
    let (start, end) =
        split_trimmed(range, layout::RANGE_SEPARATOR).ok_or_else(|| ParseError::MissingDash {
            range: range.to_string(),
        })?;

    let invalid_number = || ParseError::InvalidNumber {
        range: range.to_string(),
    };
    let start: i64 = start.parse().map_err(|_| invalid_number())?;
    let end: i64 = end.parse().map_err(|_| invalid_number())?;

    if start < 0 || end < start {
        return Err(ParseError::InvalidRange { start, end });
    }
    let start_byte = usize::try_from(start).map_err(|_| invalid_number())?;
    let end_byte = usize::try_from(end).map_err(|_| invalid_number())?;
    Ok((start_byte, end_byte))
}

#[cfg(test)]
mod tests {
    use super::{FieldSpec, parse_mask};
    use crate::mask::error::ParseError;

    fn spec(name: &str, start_byte: usize, end_byte: usize) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            start_byte,
            end_byte,
        }
    }

    #[test]
    fn parse_two_fields_in_order() {
        let fields = parse_mask("a:0-1,b:2-3").unwrap();
        assert_eq!(fields, vec![spec("a", 0, 1), spec("b", 2, 3)]);
    }

    #[test]
    fn parse_trims_every_component() {
        let fields = parse_mask(" \tlen : 4 -\t7 , crc:8-8").unwrap();
        assert_eq!(fields, vec![spec("len", 4, 7), spec("crc", 8, 8)]);
    }

    #[test]
    fn parse_keeps_duplicate_names() {
        let fields = parse_mask("x:0-0,x:1-1").unwrap();
        assert_eq!(fields, vec![spec("x", 0, 0), spec("x", 1, 1)]);
    }

    #[test]
    fn parse_empty_mask_yields_no_fields() {
        assert!(parse_mask("").unwrap().is_empty());
        assert_eq!(parse_mask("a:0-0,").unwrap(), vec![spec("a", 0, 0)]);
    }

    #[test]
    fn parse_keeps_offsets_verbatim() {
        let fields = parse_mask("big:1000-1015").unwrap();
        assert_eq!(fields[0].start_byte, 1000);
        assert_eq!(fields[0].end_byte, 1015);
    }

    #[test]
    fn missing_colon() {
        let err = parse_mask("bad").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColon {
                token: "bad".to_string()
            }
        );
        assert!(err.to_string().contains("got: bad"));
    }

    #[test]
    fn interior_empty_token_is_missing_colon() {
        let err = parse_mask("a:0-1,,b:2-3").unwrap_err();
        assert!(matches!(err, ParseError::MissingColon { token } if token.is_empty()));
    }

    #[test]
    fn empty_name() {
        let err = parse_mask(" :0-1").unwrap_err();
        assert!(matches!(err, ParseError::EmptyName { .. }));
    }

    #[test]
    fn missing_dash() {
        let err = parse_mask("a:0").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingDash {
                range: "0".to_string()
            }
        );
    }

    #[test]
    fn invalid_number() {
        let err = parse_mask("a:x-1").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                range: "x-1".to_string()
            }
        );
        assert!(err.to_string().contains("x-1"));
    }

    #[test]
    fn trailing_garbage_is_invalid_number() {
        let err = parse_mask("a:1abc-2").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn overflow_is_invalid_number() {
        let err = parse_mask("a:0-99999999999999999999").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn negative_start_is_invalid_number() {
        let err = parse_mask("a:-1-2").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { range } if range == "-1-2"));
    }

    #[test]
    fn reversed_range() {
        let err = parse_mask("a:3-1").unwrap_err();
        assert_eq!(err, ParseError::InvalidRange { start: 3, end: 1 });
        assert_eq!(err.to_string(), "invalid byte range: 3-1");
    }

    #[test]
    fn negative_end_is_invalid_range() {
        let err = parse_mask("a:1--5").unwrap_err();
        assert_eq!(err, ParseError::InvalidRange { start: 1, end: -5 });
    }

    #[test]
    fn first_error_wins() {
        let err = parse_mask("a:3-1,bad").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRange { .. }));
    }
}
