//! Loading the chromosome sort order.
//!
//! Accepted inputs:
//! - FASTA index (`.fai`), parsed with noodles
//! - Sequence dictionary (`.dict`), parsed with noodles as a SAM header
//! - Any other text file with one chromosome name in the first tab-separated
//!   column of each line

use std::ffi::OsStr;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::chromosome::ChromosomeOrder;
use crate::parsing::input::{open_input, ParseError};

/// Load a chromosome order, choosing the parser from the file extension.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if an index or dictionary cannot be parsed, or `ParseError::InvalidFormat`
/// if no chromosome names are found.
pub fn load_chromosome_order(path: &Path) -> Result<ChromosomeOrder, ParseError> {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);

    let names = match ext.as_deref() {
        Some("fai") => parse_fai_file(path)?,
        Some("dict") => parse_dict_file(path)?,
        _ => {
            let mut text = String::new();
            open_input(path)?.read_to_string(&mut text)?;
            parse_chromosome_list_text(&text)
        }
    };

    if names.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "No chromosome names found in {}",
            path.display()
        )));
    }

    Ok(ChromosomeOrder::new(names))
}

/// Chromosome names from a FASTA index
fn parse_fai_file(path: &Path) -> Result<Vec<String>, ParseError> {
    use noodles::fasta;

    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    let mut names = Vec::new();
    for record in index.as_ref() {
        names.push(String::from_utf8_lossy(record.name()).to_string());
    }
    Ok(names)
}

/// Chromosome names from the `@SQ` lines of a sequence dictionary
fn parse_dict_file(path: &Path) -> Result<Vec<String>, ParseError> {
    use noodles::sam;

    let mut reader = std::fs::File::open(path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse dict file: {e}")))?;

    Ok(header
        .reference_sequences()
        .keys()
        .map(ToString::to_string)
        .collect())
}

/// First column of each non-blank, non-comment line
#[must_use]
pub fn parse_chromosome_list_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split('\t').next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
