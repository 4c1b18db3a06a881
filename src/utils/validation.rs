//! Centralized validation and helper functions.

use std::fs::File;
use std::path::{Path, PathBuf};

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Input path is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Cannot read input file {}: {source}", path.display())]
    InputNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid E-value cutoff '{0}': expected a non-negative number")]
    InvalidEvalue(String),
}

/// Check that an input file exists and can be opened for reading.
///
/// Run this for every input before any processing starts, so a bad path
/// aborts the run before any output file is created.
///
/// # Errors
///
/// Returns `ValidationError::InputNotFound` if the path does not exist,
/// `ValidationError::NotAFile` if it is a directory, or
/// `ValidationError::InputNotReadable` if it cannot be opened.
pub fn check_input_readable(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }
    File::open(path).map_err(|source| ValidationError::InputNotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Parse an E-value cutoff.
///
/// Accepts any finite, non-negative number, including scientific notation.
///
/// # Examples
///
/// ```
/// use rbh_finder::utils::validation::parse_evalue_cutoff;
///
/// assert_eq!(parse_evalue_cutoff("1e-10").unwrap(), 1e-10);
/// assert_eq!(parse_evalue_cutoff("0.001").unwrap(), 0.001);
/// assert!(parse_evalue_cutoff("-1").is_err());
/// assert!(parse_evalue_cutoff("inf").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::InvalidEvalue` if the value is not a finite,
/// non-negative number.
pub fn parse_evalue_cutoff(value: &str) -> Result<f64, ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(cutoff) if cutoff.is_finite() && cutoff >= 0.0 => Ok(cutoff),
        _ => Err(ValidationError::InvalidEvalue(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_parse_evalue_cutoff() {
        assert_eq!(parse_evalue_cutoff("1e-10").unwrap(), 1e-10);
        assert_eq!(parse_evalue_cutoff("0").unwrap(), 0.0);
        assert_eq!(parse_evalue_cutoff(" 10 ").unwrap(), 10.0);

        assert!(parse_evalue_cutoff("").is_err());
        assert!(parse_evalue_cutoff("abc").is_err());
        assert!(parse_evalue_cutoff("-1e-5").is_err());
        assert!(parse_evalue_cutoff("NaN").is_err());
    }

    #[test]
    fn test_check_input_readable() {
        let temp = NamedTempFile::new().unwrap();
        assert!(check_input_readable(temp.path()).is_ok());
    }

    #[test]
    fn test_check_input_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.tsv");

        match check_input_readable(&missing) {
            Err(ValidationError::InputNotFound(path)) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_check_input_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            check_input_readable(dir.path()),
            Err(ValidationError::NotAFile(_))
        ));
    }
}
