//! Per-row orchestration: resolve endianness, parse the mask, decode fields.

use serde::{Deserialize, Serialize};

use crate::extract::Endianness;
use crate::mask::{ParseError, parse_mask};

/// One input row. `None` stands for a null value in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    pub mask: Option<String>,
    pub payload: Option<Vec<u8>>,
    pub endian: Option<String>,
}

impl RowRecord {
    pub fn new(mask: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            mask: Some(mask.into()),
            payload: Some(payload),
            endian: None,
        }
    }

    pub fn with_endian(mut self, endian: impl Into<String>) -> Self {
        self.endian = Some(endian.into());
        self
    }
}

/// A decoded `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedField {
    pub name: String,
    pub value: i64,
}

/// Decode one row.
///
/// Returns `Ok(None)` when the mask or the payload is null. Otherwise yields
/// one [`DecodedField`] per mask token, in mask order.
///
/// # Examples
/// ```
/// use bytemask_core::{Endianness, RowRecord, decode_row};
///
/// let row = RowRecord::new("kind:0-0, len:1-2", vec![0x07, 0x00, 0x10]);
/// let fields = decode_row(&row, Endianness::Big).unwrap().unwrap();
/// assert_eq!(fields[1].name, "len");
/// assert_eq!(fields[1].value, 16);
///
/// let null_row = RowRecord::default();
/// assert!(decode_row(&null_row, Endianness::Big).unwrap().is_none());
/// ```
///
/// # Errors
/// Returns [`ParseError`] for an invalid endianness token or mask string.
pub fn decode_row(
    row: &RowRecord,
    default_endianness: Endianness,
) -> Result<Option<Vec<DecodedField>>, ParseError> {
    let (Some(mask), Some(payload)) = (row.mask.as_deref(), row.payload.as_deref()) else {
        return Ok(None);
    };

    let endianness = Endianness::resolve(row.endian.as_deref(), default_endianness)?;
    let fields = parse_mask(mask)?
        .into_iter()
        .map(|spec| {
            let value = spec.decode(payload, endianness);
            DecodedField {
                name: spec.name,
                value,
            }
        })
        .collect();
    Ok(Some(fields))
}

#[cfg(test)]
mod tests {
    use super::{DecodedField, RowRecord, decode_row};
    use crate::extract::Endianness;
    use crate::mask::ParseError;

    fn field(name: &str, value: i64) -> DecodedField {
        DecodedField {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn decode_uses_default_endianness() {
        let row = RowRecord::new("a:0-1", vec![0x01, 0x02]);
        let big = decode_row(&row, Endianness::Big).unwrap();
        let little = decode_row(&row, Endianness::Little).unwrap();
        assert_eq!(big, Some(vec![field("a", 258)]));
        assert_eq!(little, Some(vec![field("a", 513)]));
    }

    #[test]
    fn row_token_overrides_default() {
        let row = RowRecord::new("a:0-1", vec![0x01, 0x02]).with_endian("little");
        let fields = decode_row(&row, Endianness::Big).unwrap();
        assert_eq!(fields, Some(vec![field("a", 513)]));
    }

    #[test]
    fn output_matches_mask_order_and_count() {
        let row = RowRecord::new("z:2-2,a:0-0,z:1-1", vec![10, 20, 30]);
        let fields = decode_row(&row, Endianness::Big).unwrap().unwrap();
        assert_eq!(fields, vec![field("z", 30), field("a", 10), field("z", 20)]);
    }

    #[test]
    fn null_inputs_yield_none() {
        let no_mask = RowRecord {
            mask: None,
            payload: Some(vec![1]),
            endian: Some("BIG".to_string()),
        };
        let no_payload = RowRecord {
            mask: Some("bad".to_string()),
            payload: None,
            endian: None,
        };
        assert_eq!(decode_row(&no_mask, Endianness::Big), Ok(None));
        assert_eq!(decode_row(&no_payload, Endianness::Big), Ok(None));
    }

    #[test]
    fn empty_payload_decodes_to_zero() {
        let row = RowRecord::new("a:0-3", Vec::new());
        let fields = decode_row(&row, Endianness::Big).unwrap();
        assert_eq!(fields, Some(vec![field("a", 0)]));
    }

    #[test]
    fn invalid_endianness_reported_before_mask_errors() {
        let row = RowRecord::new("bad", vec![1]).with_endian("BIG");
        let err = decode_row(&row, Endianness::Big).unwrap_err();
        assert!(matches!(err, ParseError::InvalidEndianness { .. }));
    }

    #[test]
    fn mask_error_aborts_row() {
        let row = RowRecord::new("a:0-1,b:3-1", vec![1, 2, 3, 4]);
        let err = decode_row(&row, Endianness::Big).unwrap_err();
        assert_eq!(err, ParseError::InvalidRange { start: 3, end: 1 });
    }
}
