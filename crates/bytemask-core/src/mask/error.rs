use thiserror::Error;

/// Errors raised while parsing a mask string or resolving a row's endianness.
///
/// Every variant carries the offending substring verbatim so hand-written
/// masks can be fixed quickly.
///
/// # Examples
/// ```
/// use bytemask_core::{ParseError, parse_mask};
///
/// let err = parse_mask("bad").unwrap_err();
/// assert!(matches!(err, ParseError::MissingColon { .. }));
/// assert!(err.to_string().contains("got: bad"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid mask format: expected 'name:start-end', got: {token}")]
    MissingColon { token: String },
    #[error("invalid mask format: empty field name in: {token}")]
    EmptyName { token: String },
    #[error("invalid range format: expected 'start-end', got: {range}")]
    MissingDash { range: String },
    #[error("invalid byte range numbers in: {range}")]
    InvalidNumber { range: String },
    #[error("invalid byte range: {start}-{end}")]
    InvalidRange { start: i64, end: i64 },
    #[error("invalid endianness: must be 'big' or 'little', got: {value}")]
    InvalidEndianness { value: String },
}
