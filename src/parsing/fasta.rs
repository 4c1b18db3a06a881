//! Extract FASTA records by identifier using noodles.
//!
//! This is the consumer of the best-hit id list: given the subject ids of the
//! accepted best hits, it pulls the matching sequences out of the subject
//! database FASTA.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna`, `.faa` (uncompressed)
//! - any of the above with `.gz` or `.bgz` (gzip/bgzip compressed)

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::Path;

use noodles::fasta;
use serde::Serialize;
use tracing::debug;

use crate::parsing::{open_buffered, ParseError};

/// Default number of bases per sequence line in extracted output
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Counts from one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub records_scanned: usize,
    pub records_written: usize,
    /// Requested ids with no record in the FASTA, in request order
    pub missing_ids: Vec<String>,
}

/// Extract the records named in `ids` from a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or the output cannot be
/// written, or `ParseError::Noodles` if a record cannot be parsed.
pub fn extract_from_path<W: Write>(
    path: &Path,
    ids: &[String],
    writer: &mut W,
    line_width: usize,
) -> Result<ExtractSummary, ParseError> {
    let mut reader = fasta::io::Reader::new(open_buffered(path)?);
    extract_records(&mut reader, ids, writer, line_width)
}

/// Copy every record whose name is in `ids` to `writer`, in FASTA order.
///
/// Each matching record is written once, even if it is listed more than once.
///
/// # Errors
///
/// See [`extract_from_path`].
pub fn extract_records<R: BufRead, W: Write>(
    reader: &mut fasta::io::Reader<R>,
    ids: &[String],
    writer: &mut W,
    line_width: usize,
) -> Result<ExtractSummary, ParseError> {
    let wanted: HashSet<&[u8]> = ids.iter().map(|id| id.as_bytes()).collect();
    let mut found: HashSet<Vec<u8>> = HashSet::new();
    let mut summary = ExtractSummary::default();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;
        summary.records_scanned += 1;

        if !wanted.contains(record.name()) || found.contains(record.name()) {
            continue;
        }

        write_record(writer, &record, line_width)?;
        found.insert(record.name().to_vec());
        summary.records_written += 1;
        debug!(
            name = %String::from_utf8_lossy(record.name()),
            "Extracted sequence"
        );
    }

    summary.missing_ids = ids
        .iter()
        .filter(|id| !found.contains(id.as_bytes()))
        .cloned()
        .collect();

    Ok(summary)
}

fn write_record<W: Write>(
    writer: &mut W,
    record: &fasta::Record,
    line_width: usize,
) -> std::io::Result<()> {
    writer.write_all(b">")?;
    writer.write_all(record.name())?;
    if let Some(description) = record.description() {
        writer.write_all(b" ")?;
        writer.write_all(description)?;
    }
    writer.write_all(b"\n")?;

    for line in record.sequence().as_ref().chunks(line_width.max(1)) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const DATABASE: &[u8] = b">id03 putative kinase\nACGTACGT\nACGT\n>id17\nGGGG\n>id22\nTTTTCCCC\n";

    fn extract(ids: &[&str], line_width: usize) -> (String, ExtractSummary) {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let mut reader = fasta::io::Reader::new(Cursor::new(DATABASE));
        let mut out = Vec::new();
        let summary = extract_records(&mut reader, &ids, &mut out, line_width).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_extract_in_fasta_order() {
        let (out, summary) = extract(&["id22", "id03"], 80);

        assert_eq!(out, ">id03 putative kinase\nACGTACGTACGT\n>id22\nTTTTCCCC\n");
        assert_eq!(summary.records_scanned, 3);
        assert_eq!(summary.records_written, 2);
        assert!(summary.missing_ids.is_empty());
    }

    #[test]
    fn test_extract_wraps_sequence() {
        let (out, _) = extract(&["id03"], 5);
        assert_eq!(out, ">id03 putative kinase\nACGTA\nCGTAC\nGT\n");
    }

    #[test]
    fn test_extract_reports_missing_ids() {
        let (out, summary) = extract(&["id17", "id99"], 80);
        assert_eq!(out, ">id17\nGGGG\n");
        assert_eq!(summary.missing_ids, vec!["id99".to_string()]);
    }

    #[test]
    fn test_extract_from_path() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(DATABASE).unwrap();
        temp.flush().unwrap();

        let mut out = Vec::new();
        let summary =
            extract_from_path(temp.path(), &["id17".to_string()], &mut out, 80).unwrap();
        assert_eq!(summary.records_written, 1);
        assert_eq!(out, b">id17\nGGGG\n");
    }
}
