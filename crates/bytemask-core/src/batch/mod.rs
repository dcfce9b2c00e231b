use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::mask::ParseError;
use crate::row::decode_row;
use crate::source::{JsonLinesSource, RowSource, SourceError};
use crate::{InputInfo, Report, RowReport, make_stub_report};

mod buffer;
mod options;

pub use buffer::{CapacityError, EntryBuffer, RowSlot};
pub use options::{DEFAULT_CHUNK_ROWS, DecodeOptions, RowErrorPolicy};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Capacity error: {0}")]
    Capacity(#[from] CapacityError),
    #[error("row {row}: {source}")]
    Row { row: u64, source: ParseError },
}

/// Decode every row of a JSON Lines file.
///
/// # Errors
/// See [`decode_source`]; also fails when the file cannot be opened.
pub fn decode_jsonl_file(path: &Path, options: &DecodeOptions) -> Result<Report, DecodeError> {
    let bytes = fs::metadata(path).map_err(SourceError::Io)?.len();
    let source = JsonLinesSource::open(path)?;
    let input = InputInfo {
        path: path.display().to_string(),
        bytes,
    };
    decode_source(input, source, options)
}

/// Decode every row of `source` into a report, one unit of work at a time.
///
/// # Examples
/// ```
/// use bytemask_core::{DecodeOptions, InputInfo, MemorySource, RowRecord, decode_source};
///
/// let rows = vec![
///     RowRecord::new("a:0-1", vec![0x01, 0x02]),
///     RowRecord::default(),
/// ];
/// let input = InputInfo { path: "memory".to_string(), bytes: 0 };
/// let report = decode_source(input, MemorySource::from(rows), &DecodeOptions::default())?;
/// assert_eq!(report.rows[0].fields.as_ref().unwrap()[0].value, 258);
/// assert!(report.rows[1].fields.is_none());
/// assert_eq!(report.summary.rows_null, 1);
/// # Ok::<(), bytemask_core::DecodeError>(())
/// ```
///
/// # Errors
/// - `DecodeError::Source` when the source fails to produce a row.
/// - `DecodeError::Row` for the first failing row under
///   [`RowErrorPolicy::Abort`].
/// - `DecodeError::Capacity` when a unit of work exceeds `max_entries`.
pub fn decode_source<S: RowSource>(
    input: InputInfo,
    mut source: S,
    options: &DecodeOptions,
) -> Result<Report, DecodeError> {
    // A zero-row unit would never flush; the report records the size in use.
    let options = DecodeOptions {
        chunk_rows: options.chunk_rows.max(1),
        ..options.clone()
    };
    let chunk_rows = options.chunk_rows;
    let mut report = make_stub_report(input, options.clone());
    let mut buffer = EntryBuffer::new(options.max_entries);
    let mut errors: Vec<Option<String>> = Vec::with_capacity(chunk_rows.min(DEFAULT_CHUNK_ROWS));
    let mut row_index = 0u64;

    while let Some(row) = source.next_row()? {
        let fields = match decode_row(&row, options.default_endianness) {
            Ok(fields) => {
                errors.push(None);
                fields
            }
            Err(err) => match options.on_row_error {
                RowErrorPolicy::Abort => {
                    return Err(DecodeError::Row {
                        row: row_index,
                        source: err,
                    });
                }
                RowErrorPolicy::Record => {
                    warn!(row = row_index, error = %err, "row failed; recording null result");
                    errors.push(Some(err.to_string()));
                    None
                }
            },
        };
        buffer.push_row(fields)?;
        row_index += 1;

        if buffer.rows() == chunk_rows {
            flush_unit(&mut report, &mut buffer, &mut errors);
        }
    }
    if buffer.rows() > 0 {
        flush_unit(&mut report, &mut buffer, &mut errors);
    }

    Ok(report)
}

fn flush_unit(report: &mut Report, buffer: &mut EntryBuffer, errors: &mut Vec<Option<String>>) {
    debug!(
        first_row = report.rows.len(),
        rows = buffer.rows(),
        entries = buffer.entries_total(),
        "unit of work decoded"
    );
    let first_row = report.rows.len() as u64;
    let rows = buffer.drain_rows().into_iter().zip(errors.drain(..));
    for ((fields, error), offset) in rows.zip(0u64..) {
        let summary = &mut report.summary;
        summary.rows_total += 1;
        match (&fields, &error) {
            (Some(fields), _) => summary.entries_total += fields.len() as u64,
            (None, Some(_)) => summary.rows_failed += 1,
            (None, None) => summary.rows_null += 1,
        }
        report.rows.push(RowReport {
            row: first_row + offset,
            fields,
            error,
        });
    }
}
