use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::layout;
use crate::mask::ParseError;

/// Byte order used to assemble a field into an integer.
///
/// The default is [`Endianness::Big`]: rows that carry no endianness token
/// decode big-endian.
///
/// # Examples
/// ```
/// use bytemask_core::Endianness;
///
/// assert_eq!("little".parse::<Endianness>().unwrap(), Endianness::Little);
/// assert!("BIG".parse::<Endianness>().is_err());
/// assert_eq!(Endianness::default(), Endianness::Big);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl Endianness {
    /// Resolve an optional per-row token, falling back to `default` when absent.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidEndianness`] for any token other than
    /// `big` or `little`. Matching is exact: no trimming, no case folding.
    pub fn resolve(token: Option<&str>, default: Endianness) -> Result<Self, ParseError> {
        token.map_or(Ok(default), |value| value.parse())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Endianness::Big => layout::BIG_ENDIAN_TOKEN,
            Endianness::Little => layout::LITTLE_ENDIAN_TOKEN,
        }
    }
}

impl FromStr for Endianness {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            layout::BIG_ENDIAN_TOKEN => Ok(Endianness::Big),
            layout::LITTLE_ENDIAN_TOKEN => Ok(Endianness::Little),
            _ => Err(ParseError::InvalidEndianness {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
