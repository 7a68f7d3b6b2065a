//! Streaming reader for the baseline coordinates file.
//!
//! Format: tab-separated, columns 1-3 chromosome/start/end, column 4 the TE
//! name, columns 5-6 family names, further columns passed through untouched.
//! Lines starting with `#` and blank lines are ignored.

use std::io::BufRead;

use crate::core::record::BaselineRecord;
use crate::parsing::input::ParseError;

/// One data line of the baseline file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineRow {
    Record(BaselineRecord),
    /// Too few columns, or coordinates that are not unsigned integers
    Malformed { line_number: usize, columns: usize },
    /// Line is not valid UTF-8
    Undecodable { line_number: usize },
}

/// A non-comment line, split into columns if it decoded
enum RawLine {
    Fields(Vec<String>),
    Undecodable,
}

/// Reads baseline rows one at a time
pub struct BaselineReader<R> {
    source: R,
    buffer: Vec<u8>,
    line_number: usize,
    header: Option<Vec<String>>,
}

impl<R: BufRead> BaselineReader<R> {
    /// Wrap a reader. With `has_header`, the first non-comment line is taken
    /// as the column names.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading the header line fails.
    pub fn new(source: R, has_header: bool) -> Result<Self, ParseError> {
        let mut reader = Self {
            source,
            buffer: Vec::new(),
            line_number: 0,
            header: None,
        };
        if has_header {
            reader.header = match reader.next_line()? {
                Some(RawLine::Fields(names)) => Some(names),
                Some(RawLine::Undecodable) => Some(split_columns(&String::from_utf8_lossy(
                    &reader.buffer,
                ))),
                None => None,
            };
        }
        Ok(reader)
    }

    /// Column names from the header line, if one was read
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// 1-based number of the last line read
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next data row, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` on read failure. Malformed and undecodable
    /// rows are returned as [`BaselineRow`] variants, not as errors.
    pub fn next_row(&mut self) -> Result<Option<BaselineRow>, ParseError> {
        let row = match self.next_line()? {
            None => return Ok(None),
            Some(RawLine::Undecodable) => BaselineRow::Undecodable {
                line_number: self.line_number,
            },
            Some(RawLine::Fields(fields)) => {
                let columns = fields.len();
                match BaselineRecord::from_fields(fields) {
                    Some(record) => BaselineRow::Record(record),
                    None => BaselineRow::Malformed {
                        line_number: self.line_number,
                        columns,
                    },
                }
            }
        };
        Ok(Some(row))
    }

    fn next_line(&mut self) -> Result<Option<RawLine>, ParseError> {
        loop {
            self.buffer.clear();
            if self.source.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let Ok(line) = std::str::from_utf8(&self.buffer) else {
                if self.buffer.starts_with(b"#") {
                    continue;
                }
                return Ok(Some(RawLine::Undecodable));
            };
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            return Ok(Some(RawLine::Fields(split_columns(line))));
        }
    }
}

fn split_columns(line: &str) -> Vec<String> {
    line.trim_end_matches(['\n', '\r'])
        .split('\t')
        .map(str::to_string)
        .collect()
}

impl<R: BufRead> Iterator for BaselineReader<R> {
    type Item = Result<BaselineRow, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
