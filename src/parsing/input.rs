//! Opening plain or gzip/bgzip-compressed text inputs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text file for buffered line reading, decompressing `.gz`/`.bgz` files.
///
/// bgzip files are a series of gzip members, so a multi-member decoder is used.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("calls.vcf.gz")));
        assert!(is_gzipped(Path::new("calls.VCF.BGZ")));
        assert!(!is_gzipped(Path::new("calls.vcf")));
    }

    #[test]
    fn test_open_gzipped_input() {
        let mut file = NamedTempFile::with_suffix(".vcf.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"line one\nline two\n").unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let reader = open_input(file.path()).unwrap();
        let lines: Vec<String> = reader.lines().map(Result::unwrap).collect();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_open_missing_input() {
        let result = open_input(Path::new("/nonexistent/calls.vcf"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
