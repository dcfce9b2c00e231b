//! bytemask core library: named integer fields out of fixed-layout binary
//! payloads.
//!
//! A mask string such as `"kind:0-0, length:1-2"` names inclusive byte
//! ranges. For every row the mask is parsed fresh (`mask`), each range is
//! decoded into an `i64` (`extract`), and the row yields ordered
//! `(name, value)` pairs (`row`). The `batch` layer drives row sources
//! (`source`), groups rows into units of work with an optional entry cap, and
//! assembles a deterministic report.
//!
//! Invariants:
//! - One output pair per mask token, in token order; duplicate names kept.
//! - Decoding never fails: short payloads degrade to partial or zero values.
//! - Null mask or payload yields a null row, never an error.
//! - Rows without an endianness token decode big-endian unless
//!   [`DecodeOptions::default_endianness`] says otherwise.
//!
//! # Examples
//! ```
//! use bytemask_core::{Endianness, decode_field, parse_mask};
//!
//! let payload = [0x02, 0x00, 0x2A];
//! let fields = parse_mask("version:0-0, count:1-2")?;
//! let values: Vec<i64> = fields
//!     .iter()
//!     .map(|field| field.decode(&payload, Endianness::Big))
//!     .collect();
//! assert_eq!(values, vec![2, 42]);
//! assert_eq!(decode_field(&payload, 1, 2, Endianness::Little), 0x2A00);
//! # Ok::<(), bytemask_core::ParseError>(())
//! ```

use serde::{Deserialize, Serialize};

mod batch;
mod extract;
mod mask;
mod row;
mod source;

pub use batch::{
    CapacityError, DEFAULT_CHUNK_ROWS, DecodeError, DecodeOptions, EntryBuffer, RowErrorPolicy,
    RowSlot, decode_jsonl_file, decode_source,
};
pub use extract::{Endianness, decode_field};
pub use mask::{FieldSpec, ParseError, parse_mask};
pub use row::{DecodedField, RowRecord, decode_row};
pub use source::{JSONL_EXTENSIONS, JsonLinesSource, MemorySource, RowSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Batch decoding report with rows in input order.
///
/// # Examples
/// ```
/// use bytemask_core::{DecodeOptions, InputInfo, make_stub_report};
///
/// let input = InputInfo { path: "rows.jsonl".to_string(), bytes: 12 };
/// let report = make_stub_report(input, DecodeOptions::default());
/// assert_eq!(report.report_version, bytemask_core::REPORT_VERSION);
/// assert!(report.rows.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,
    pub input: InputInfo,
    /// Options the batch was decoded with.
    pub options: DecodeOptions,
    pub summary: BatchSummary,
    /// One entry per input row, in input order.
    pub rows: Vec<RowReport>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Row and entry counters for a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub rows_total: u64,
    /// Rows with a null mask or payload.
    pub rows_null: u64,
    /// Rows whose error was recorded instead of aborting the batch.
    pub rows_failed: u64,
    pub entries_total: u64,
}

/// Decoding result for a single row.
///
/// `fields` is `null` in JSON for null rows and for recorded failures; the
/// latter also carry `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowReport {
    /// 0-based row index in the input.
    pub row: u64,
    pub fields: Option<Vec<DecodedField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a report with base fields filled and no rows.
pub fn make_stub_report(input: InputInfo, options: DecodeOptions) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "bytemask".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input,
        options,
        summary: BatchSummary::default(),
        rows: vec![],
    }
}
