//! Forward-only, window-queryable reader for RetroSeq calls files.
//!
//! A RetroSeq calls file is a VCF whose data lines have exactly 10 columns:
//!
//! | Column | Used as |
//! |--------|---------|
//! | 1 | chromosome |
//! | 2 | position |
//! | 6 | supporting read count |
//! | 8 | tag list; the value of the first `key=value` segment is the called TE |
//!
//! Header lines (`#`) and blank lines are skipped. Lines that do not fit the
//! layout are logged and skipped without interrupting the scan.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::chromosome::ChromosomeOrder;
use crate::core::record::CallRecord;
use crate::core::window::WindowBuffer;
use crate::parsing::input::{open_input, ParseError};
use crate::utils::validation::calls_source_name;

/// Number of tab-separated columns on a RetroSeq calls data line
pub const CALLS_FIELD_COUNT: usize = 10;

/// Parse one line of a calls file.
///
/// Returns `Ok(None)` for header and blank lines.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the line does not have exactly
/// [`CALLS_FIELD_COUNT`] columns, the position or read count is not an
/// unsigned integer, or the tag column has no `key=value` first segment.
pub fn parse_calls_line(line: &str) -> Result<Option<CallRecord>, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != CALLS_FIELD_COUNT {
        return Err(ParseError::InvalidFormat(format!(
            "expected {CALLS_FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    }

    let position: u64 = fields[1].trim().parse().map_err(|_| {
        ParseError::InvalidFormat(format!("invalid position '{}'", fields[1]))
    })?;
    let support_count: u64 = fields[5].trim().parse().map_err(|_| {
        ParseError::InvalidFormat(format!("invalid read count '{}'", fields[5]))
    })?;

    let called_name = fields[7]
        .split(',')
        .next()
        .and_then(|segment| segment.split('=').nth(1))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("no called element in tags '{}'", fields[7]))
        })?;

    Ok(Some(CallRecord::new(
        fields[0],
        position,
        support_count,
        called_name,
    )))
}

/// Where a call sits relative to a query window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Behind,
    Within,
    Ahead,
}

fn place(
    order: &ChromosomeOrder,
    call: &CallRecord,
    chromosome: &str,
    start: u64,
    end: u64,
) -> Placement {
    match order.compare(&call.chromosome, chromosome) {
        Ordering::Less => Placement::Behind,
        Ordering::Greater => Placement::Ahead,
        Ordering::Equal if call.position < start => Placement::Behind,
        Ordering::Equal if call.position > end => Placement::Ahead,
        Ordering::Equal => Placement::Within,
    }
}

/// Streams a coordinate-sorted calls file, buffering the calls that overlap
/// the most recently queried window.
///
/// Windows must be queried in non-decreasing `(chromosome, start)` order;
/// records skipped over are never revisited.
pub struct OrderedCallsReader<R> {
    name: String,
    source: R,
    order: Arc<ChromosomeOrder>,
    lookahead: VecDeque<CallRecord>,
    window: WindowBuffer,
    buffer: Vec<u8>,
    line_number: usize,
    eof: bool,
    records_read: usize,
    malformed_lines: usize,
    last_read: Option<(String, u64)>,
    last_query: Option<(String, u64)>,
}

impl OrderedCallsReader<Box<dyn BufRead>> {
    /// Open a calls file, named after the file itself.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn from_path(path: &Path, order: Arc<ChromosomeOrder>) -> Result<Self, ParseError> {
        let source = open_input(path)?;
        Ok(Self::new(calls_source_name(path), source, order))
    }
}

impl<R: BufRead> OrderedCallsReader<R> {
    pub fn new(name: impl Into<String>, source: R, order: Arc<ChromosomeOrder>) -> Self {
        Self {
            name: name.into(),
            source,
            order,
            lookahead: VecDeque::new(),
            window: WindowBuffer::new(),
            buffer: Vec::new(),
            line_number: 0,
            eof: false,
            records_read: 0,
            malformed_lines: 0,
            last_read: None,
            last_query: None,
        }
    }

    /// Short name of the calls source
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Valid call records pulled from the underlying source so far
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Malformed lines skipped so far
    #[must_use]
    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }

    /// True once the underlying source is exhausted
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    #[must_use]
    pub fn window(&self) -> &WindowBuffer {
        &self.window
    }

    /// Move the window forward to `[start, end]` on `chromosome`.
    ///
    /// Buffered calls before `start` or on another chromosome are dropped,
    /// buffered calls after `end` go back to the lookahead queue, and new calls
    /// are read until the first one beyond the window, which is held for the
    /// next query.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading the underlying source fails.
    /// Malformed lines are not errors; they are logged and skipped.
    pub fn advance_to_window(
        &mut self,
        chromosome: &str,
        start: u64,
        end: u64,
    ) -> Result<(), ParseError> {
        self.check_forward(chromosome, start);

        self.window.purge_front(chromosome, start);
        self.window.return_beyond(end, &mut self.lookahead);

        while self.fill_lookahead()? {
            let Some(next) = self.lookahead.front() else {
                break;
            };
            match place(&self.order, next, chromosome, start, end) {
                Placement::Ahead => break,
                Placement::Behind => {
                    self.lookahead.pop_front();
                }
                Placement::Within => {
                    if let Some(record) = self.lookahead.pop_front() {
                        self.window.push_back(record);
                    }
                }
            }
        }

        Ok(())
    }

    /// Every buffered call sharing the highest read count; empty if none overlap
    #[must_use]
    pub fn best_calls(&self) -> Vec<&CallRecord> {
        self.window.best()
    }

    fn check_forward(&mut self, chromosome: &str, start: u64) {
        if let Some((last_chromosome, last_start)) = &self.last_query {
            let ordering = self
                .order
                .compare_positions((chromosome, start), (last_chromosome.as_str(), *last_start));
            if ordering == Ordering::Less {
                warn!(
                    source = %self.name,
                    chromosome,
                    start,
                    previous_chromosome = %last_chromosome,
                    previous_start = last_start,
                    "Query window moved backwards; calls already passed will not be revisited"
                );
            }
        }
        self.last_query = Some((chromosome.to_string(), start));
    }

    /// Ensure the lookahead queue holds at least one record. Returns false at end of source.
    fn fill_lookahead(&mut self) -> Result<bool, ParseError> {
        if !self.lookahead.is_empty() {
            return Ok(true);
        }
        while !self.eof {
            if let Some(record) = self.read_record()? {
                self.lookahead.push_back(record);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn read_record(&mut self) -> Result<Option<CallRecord>, ParseError> {
        self.buffer.clear();
        if self.source.read_until(b'\n', &mut self.buffer)? == 0 {
            self.eof = true;
            debug!(
                source = %self.name,
                records = self.records_read,
                malformed = self.malformed_lines,
                "Reached end of calls file"
            );
            return Ok(None);
        }
        self.line_number += 1;

        let parsed = match std::str::from_utf8(&self.buffer) {
            Ok(line) => parse_calls_line(line),
            Err(e) => Err(ParseError::InvalidFormat(format!("line is not valid UTF-8: {e}"))),
        };

        match parsed {
            Ok(Some(record)) => {
                self.records_read += 1;
                self.check_sorted(&record);
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.malformed_lines += 1;
                warn!(
                    source = %self.name,
                    line = self.line_number,
                    error = %e,
                    "Skipping malformed calls record"
                );
                Ok(None)
            }
        }
    }

    fn check_sorted(&mut self, record: &CallRecord) {
        if let Some((chromosome, position)) = &self.last_read {
            let ordering = self.order.compare_positions(
                (record.chromosome.as_str(), record.position),
                (chromosome.as_str(), *position),
            );
            if ordering == Ordering::Less {
                warn!(
                    source = %self.name,
                    line = self.line_number,
                    chromosome = %record.chromosome,
                    position = record.position,
                    "Calls file is not sorted; this call may be missed"
                );
            }
        }
        self.last_read = Some((record.chromosome.clone(), record.position));
    }
}
