//! Centralized input validation and naming helpers.

use std::path::{Path, PathBuf};

/// File name suffixes recognised as calls files (compared lowercased)
pub const CALLS_FILE_SUFFIXES: [&str; 3] = [".vcf", ".vcf.gz", ".vcf.bgz"];

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("Input is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Unable to scan {} for VCF files: {source}", .path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No VCF files detected in: {}", .0.display())]
    NoCallsFiles(PathBuf),
    #[error("No calls files given")]
    NoCallsSources,
}

/// Check whether a path names a calls file (`.vcf`, `.vcf.gz`, `.vcf.bgz`, any case).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use retro_compare::utils::validation::is_calls_file;
///
/// assert!(is_calls_file(Path::new("runs/sample_A.VCF")));
/// assert!(is_calls_file(Path::new("sample_B.vcf.gz")));
/// assert!(!is_calls_file(Path::new("sample_C.bed")));
/// ```
#[must_use]
pub fn is_calls_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    CALLS_FILE_SUFFIXES
        .iter()
        .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
}

/// Short name for a calls source: its file name without a calls-file suffix.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use retro_compare::utils::validation::calls_source_name;
///
/// assert_eq!(calls_source_name(Path::new("/data/run1/N2_rep1.vcf.gz")), "N2_rep1");
/// assert_eq!(calls_source_name(Path::new("calls.txt")), "calls.txt");
/// ```
#[must_use]
pub fn calls_source_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    for suffix in CALLS_FILE_SUFFIXES {
        if name.len() > suffix.len() {
            let stem_len = name.len() - suffix.len();
            if name.is_char_boundary(stem_len) && name[stem_len..].eq_ignore_ascii_case(suffix) {
                return name[..stem_len].to_string();
            }
        }
    }
    name
}

/// Check that `path` exists and is a regular file.
///
/// # Errors
///
/// Returns `ValidationError::MissingInput` or `ValidationError::NotAFile`.
pub fn validate_input_file(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::MissingInput(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Expand calls arguments into calls files.
///
/// Files are taken as given, whatever their extension. Directories are
/// scanned (not recursively) for calls files, which are added in file-name
/// order.
///
/// # Errors
///
/// Returns `ValidationError::MissingInput` for a path that does not exist,
/// `ValidationError::UnreadableDirectory` if a directory cannot be listed,
/// `ValidationError::NoCallsFiles` if a directory holds no calls files, or
/// `ValidationError::NoCallsSources` if `inputs` is empty.
pub fn discover_calls_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ValidationError> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let entries =
                std::fs::read_dir(input).map_err(|source| ValidationError::UnreadableDirectory {
                    path: input.clone(),
                    source,
                })?;

            let mut found: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && is_calls_file(path))
                .collect();

            if found.is_empty() {
                return Err(ValidationError::NoCallsFiles(input.clone()));
            }
            found.sort();
            files.extend(found);
        } else {
            validate_input_file(input)?;
            files.push(input.clone());
        }
    }

    if files.is_empty() {
        return Err(ValidationError::NoCallsSources);
    }

    Ok(files)
}
