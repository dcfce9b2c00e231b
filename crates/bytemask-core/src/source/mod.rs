mod jsonl;

pub use jsonl::JsonLinesSource;
pub use jsonl::layout::JSONL_EXTENSIONS;

use thiserror::Error;

use crate::row::RowRecord;

/// A sequential supplier of rows.
pub trait RowSource {
    fn next_row(&mut self) -> Result<Option<RowRecord>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("row parse error (line {line}): {message}")]
    Row { line: usize, message: String },
}

impl From<jsonl::error::JsonlSourceError> for SourceError {
    fn from(value: jsonl::error::JsonlSourceError) -> Self {
        match value {
            jsonl::error::JsonlSourceError::Io(err) => SourceError::Io(err),
            jsonl::error::JsonlSourceError::Json { line, message } => {
                SourceError::Row { line, message }
            }
            jsonl::error::JsonlSourceError::Payload { line, message } => SourceError::Row {
                line,
                message: format!("invalid payload hex: {message}"),
            },
        }
    }
}

/// In-memory rows, mostly useful for embedding and tests.
///
/// # Examples
/// ```
/// use bytemask_core::{MemorySource, RowRecord, RowSource};
///
/// let mut source = MemorySource::from(vec![RowRecord::new("a:0-0", vec![1])]);
/// assert!(source.next_row()?.is_some());
/// assert!(source.next_row()?.is_none());
/// # Ok::<(), bytemask_core::SourceError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    rows: std::vec::IntoIter<RowRecord>,
}

impl From<Vec<RowRecord>> for MemorySource {
    fn from(rows: Vec<RowRecord>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl RowSource for MemorySource {
    fn next_row(&mut self) -> Result<Option<RowRecord>, SourceError> {
        Ok(self.rows.next())
    }
}
