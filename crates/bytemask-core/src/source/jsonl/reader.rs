use std::io::BufRead;

use super::error::JsonlSourceError;

/// Line reader that skips blank lines and keeps 1-based line numbers.
pub struct LineReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    /// Next non-blank line with its line number, without the line terminator.
    ///
    /// # Errors
    /// Returns `JsonlSourceError::Io` on read failure or invalid UTF-8.
    pub fn next_line(&mut self) -> Result<Option<(usize, String)>, JsonlSourceError> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if self.buf.trim().is_empty() {
                continue;
            }
            let line = self.buf.trim_end_matches(['\r', '\n']).to_string();
            return Ok(Some((self.line, line)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LineReader;
    use crate::source::jsonl::error::JsonlSourceError;
    use std::io::Cursor;

    #[test]
    fn skips_blank_lines_and_counts_them() {
        let mut reader = LineReader::new(Cursor::new("{}\n\n  \r\n{\"a\":1}\r\n"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "{}".to_string())));
        assert_eq!(
            reader.next_line().unwrap(),
            Some((4, "{\"a\":1}".to_string()))
        );
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn last_line_without_newline() {
        let mut reader = LineReader::new(Cursor::new("{}"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "{}".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_io_error() {
        let mut reader = LineReader::new(Cursor::new(vec![0xFF, 0xFE, b'\n']));
        let err = reader.next_line().unwrap_err();
        assert!(matches!(err, JsonlSourceError::Io(_)));
    }
}
