use serde::{Deserialize, Serialize};

use crate::extract::Endianness;

/// Rows per unit of work when none is configured.
pub const DEFAULT_CHUNK_ROWS: usize = 2048;

/// What the batch driver does when a row fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Stop the batch at the first failing row.
    #[default]
    Abort,
    /// Keep going; the row is reported with null fields and its error.
    Record,
}

/// Batch decoding configuration.
///
/// # Examples
/// ```
/// use bytemask_core::{DecodeOptions, Endianness, RowErrorPolicy};
///
/// let options = DecodeOptions::default();
/// assert_eq!(options.default_endianness, Endianness::Big);
/// assert_eq!(options.chunk_rows, bytemask_core::DEFAULT_CHUNK_ROWS);
/// assert_eq!(options.max_entries, None);
/// assert_eq!(options.on_row_error, RowErrorPolicy::Abort);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Byte order for rows without an endianness token.
    pub default_endianness: Endianness,
    /// Rows grouped into one unit of work.
    pub chunk_rows: usize,
    /// Cap on decoded entries per unit of work; unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
    pub on_row_error: RowErrorPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            default_endianness: Endianness::default(),
            chunk_rows: DEFAULT_CHUNK_ROWS,
            max_entries: None,
            on_row_error: RowErrorPolicy::default(),
        }
    }
}
