//! Readers for the files this tool consumes.
//!
//! - **Tabular alignment output**: 12-column, tab-separated search results
//!   (BLAST `-outfmt 6` and compatible tools)
//! - **Identifier lists**: one sequence id per line
//! - **FASTA files**: sequences to extract by id, parsed with noodles
//!
//! All readers accept gzip/bgzip compressed input when the path ends in
//! `.gz` or `.bgz`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rbh_finder::parsing::tabular::TabularReader;
//! use std::path::Path;
//!
//! let mut reader = TabularReader::from_path(Path::new("hits.tsv")).unwrap();
//! for record in reader.records() {
//!     let record = record.unwrap();
//!     println!("{} -> {} ({})", record.query_id, record.subject_id, record.bit_score);
//! }
//! println!("{} lines read", reader.lines_read());
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod fasta;
pub mod ids;
pub mod tabular;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {column} value on line {line}: '{value}'")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a file for buffered reading, decompressing it if it is gzipped.
///
/// bgzip files are multi-member gzip streams, so a multi-member decoder is used.
pub(crate) fn open_buffered(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
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

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("hits.tsv.gz")));
        assert!(is_gzipped(Path::new("seqs.fa.bgz")));
        assert!(is_gzipped(Path::new("/data/HITS.TSV.GZ")));
        assert!(!is_gzipped(Path::new("hits.tsv")));
        assert!(!is_gzipped(Path::new("hits.gzip")));
    }
}
