use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::row::RowRecord;
use crate::source::{RowSource, SourceError};

use super::error::JsonlSourceError;
use super::layout;
use super::reader::LineReader;

/// Row source backed by a JSON Lines stream.
pub struct JsonLinesSource<R> {
    lines: LineReader<R>,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        Ok(Self::from_reader(BufReader::with_capacity(
            layout::SOURCE_BUFFER_SIZE,
            file,
        )))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }
}

impl<R: BufRead> RowSource for JsonLinesSource<R> {
    fn next_row(&mut self) -> Result<Option<RowRecord>, SourceError> {
        next_row(&mut self.lines).map_err(SourceError::from)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRow {
    #[serde(default)]
    mask: Option<String>,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    endian: Option<String>,
}

fn next_row<R: BufRead>(
    lines: &mut LineReader<R>,
) -> Result<Option<RowRecord>, JsonlSourceError> {
    let Some((line, text)) = lines.next_line()? else {
        return Ok(None);
    };
    parse_row_line(line, &text).map(Some)
}

fn parse_row_line(line: usize, text: &str) -> Result<RowRecord, JsonlSourceError> {
    let raw: RawRow = serde_json::from_str(text).map_err(|e| JsonlSourceError::Json {
        line,
        message: e.to_string(),
    })?;
    let payload = raw
        .payload
        .map(|hex_text| {
            hex::decode(hex_text.trim()).map_err(|e| JsonlSourceError::Payload {
                line,
                message: e.to_string(),
            })
        })
        .transpose()?;

    Ok(RowRecord {
        mask: raw.mask,
        payload,
        endian: raw.endian,
    })
}

#[cfg(test)]
mod tests {
    use super::{JsonLinesSource, parse_row_line};
    use crate::row::RowRecord;
    use crate::source::jsonl::error::JsonlSourceError;
    use crate::source::{RowSource, SourceError};
    use std::io::Cursor;

    #[test]
    fn parse_full_row() {
        let row = parse_row_line(
            1,
            r#"{"mask":"a:0-1","payload":"0102","endian":"little"}"#,
        )
        .unwrap();
        assert_eq!(row, RowRecord::new("a:0-1", vec![1, 2]).with_endian("little"));
    }

    #[test]
    fn missing_and_null_keys_are_null() {
        let row = parse_row_line(1, r#"{"mask":null}"#).unwrap();
        assert_eq!(row, RowRecord::default());
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let row = parse_row_line(1, r#"{"mask":"a:0-0","payload":"ABcd"}"#).unwrap();
        assert_eq!(row.payload, Some(vec![0xAB, 0xCD]));
    }

    #[test]
    fn empty_hex_is_empty_payload() {
        let row = parse_row_line(1, r#"{"mask":"a:0-0","payload":""}"#).unwrap();
        assert_eq!(row.payload, Some(Vec::new()));
    }

    #[test]
    fn odd_hex_is_payload_error() {
        let err = parse_row_line(3, r#"{"payload":"abc"}"#).unwrap_err();
        assert!(matches!(err, JsonlSourceError::Payload { line: 3, .. }));
    }

    #[test]
    fn unknown_key_is_json_error() {
        let err = parse_row_line(2, r#"{"maks":"a:0-0"}"#).unwrap_err();
        assert!(matches!(err, JsonlSourceError::Json { line: 2, .. }));
    }

    #[test]
    fn source_reports_line_numbers() {
        let input = "{\"mask\":\"a:0-0\",\"payload\":\"01\"}\n\nnot json\n";
        let mut source = JsonLinesSource::from_reader(Cursor::new(input));
        assert!(source.next_row().unwrap().is_some());
        let err = source.next_row().unwrap_err();
        assert!(matches!(err, SourceError::Row { line: 3, .. }));
    }
}
