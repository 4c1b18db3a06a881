use std::fmt;

use crate::parsing::ParseError;

/// Number of tab-separated columns in a tabular alignment line
pub const FIELD_COUNT: usize = 12;

/// Column names in file order, used in error messages
pub const COLUMN_NAMES: [&str; FIELD_COUNT] = [
    "qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend", "sstart",
    "send", "evalue", "bitscore",
];

/// One alignment between a query and a subject sequence
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    /// Query id with surrounding whitespace trimmed
    pub query_id: String,
    /// Subject id with surrounding whitespace trimmed
    pub subject_id: String,
    /// Informational, not used for ranking
    pub percent_identity: f64,
    pub align_length: u64,
    pub mismatches: u64,
    pub gap_opens: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub subject_start: u64,
    pub subject_end: u64,
    /// Expect value; lower is more significant
    pub expect_value: f64,
    /// Bit score; higher is a stronger match
    pub bit_score: f64,
    /// The line as read, without its line terminator
    pub raw_line: String,
}

/// Outcome of parsing a single input line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Record(AlignmentRecord),
    /// Empty or whitespace-only line
    Blank,
    /// Wrong number of fields or an empty identifier
    Malformed { fields: usize },
}

impl AlignmentRecord {
    /// The E-value and bit score columns exactly as they appear in the input.
    ///
    /// Writing these back avoids re-formatting values like `2e-37`.
    #[must_use]
    pub fn score_columns(&self) -> (&str, &str) {
        let mut tail = self.raw_line.rsplitn(3, '\t');
        let bit_score = tail.next().unwrap_or_default().trim();
        let expect_value = tail.next().unwrap_or_default().trim();
        (expect_value, bit_score)
    }
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_line)
    }
}

/// Parse one line of 12-column tabular alignment output.
///
/// Blank lines and lines with the wrong number of fields are reported as
/// [`ParsedLine::Blank`] and [`ParsedLine::Malformed`] so callers can skip and
/// count them. `line_number` is 1-based and only used in error messages.
///
/// The query and subject ids are trimmed of surrounding whitespace; grouping,
/// reciprocal matching and the id output all use the trimmed ids, while the
/// raw line is kept untouched.
///
/// All ten numeric columns are parsed strictly, including the informational
/// ones (pident, length, mismatch, gapopen, qstart, qend, sstart, send): a
/// line whose numbers do not parse is not 12-column search output.
///
/// # Errors
///
/// Returns `ParseError::InvalidNumber` if any numeric column cannot be parsed,
/// or if the E-value or bit score is NaN or the E-value is negative.
pub fn parse_line(line: &str, line_number: usize) -> Result<ParsedLine, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(ParsedLine::Blank);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Ok(ParsedLine::Malformed {
            fields: fields.len(),
        });
    }

    let query_id = fields[0].trim();
    let subject_id = fields[1].trim();
    if query_id.is_empty() || subject_id.is_empty() {
        return Ok(ParsedLine::Malformed {
            fields: fields.len(),
        });
    }

    let expect_value: f64 = parse_column(&fields, 10, line_number)?;
    if expect_value.is_nan() || expect_value < 0.0 {
        return Err(invalid_number(&fields, 10, line_number));
    }
    let bit_score: f64 = parse_column(&fields, 11, line_number)?;
    if bit_score.is_nan() {
        return Err(invalid_number(&fields, 11, line_number));
    }

    Ok(ParsedLine::Record(AlignmentRecord {
        query_id: query_id.to_string(),
        subject_id: subject_id.to_string(),
        percent_identity: parse_column(&fields, 2, line_number)?,
        align_length: parse_column(&fields, 3, line_number)?,
        mismatches: parse_column(&fields, 4, line_number)?,
        gap_opens: parse_column(&fields, 5, line_number)?,
        query_start: parse_column(&fields, 6, line_number)?,
        query_end: parse_column(&fields, 7, line_number)?,
        subject_start: parse_column(&fields, 8, line_number)?,
        subject_end: parse_column(&fields, 9, line_number)?,
        expect_value,
        bit_score,
        raw_line: line.to_string(),
    }))
}

fn parse_column<T: std::str::FromStr>(
    fields: &[&str],
    index: usize,
    line_number: usize,
) -> Result<T, ParseError> {
    fields[index]
        .trim()
        .parse()
        .map_err(|_| invalid_number(fields, index, line_number))
}

fn invalid_number(fields: &[&str], index: usize, line_number: usize) -> ParseError {
    ParseError::InvalidNumber {
        line: line_number,
        column: COLUMN_NAMES[index],
        value: fields[index].to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a well-formed record for tests from the fields that matter for ranking.
    pub(crate) fn record(
        query: &str,
        subject: &str,
        evalue: &str,
        bitscore: &str,
    ) -> AlignmentRecord {
        let line = format!(
            "{query}\t{subject}\t95.00\t100\t5\t0\t1\t100\t1\t100\t{evalue}\t{bitscore}"
        );
        match parse_line(&line, 1).unwrap() {
            ParsedLine::Record(record) => record,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_blast_line() {
        let line = "query_001\tid03\t62.32\t138\t52\t0\t1\t138\t1\t138\t2e-37\t154";
        let ParsedLine::Record(record) = parse_line(line, 1).unwrap() else {
            panic!("expected a record");
        };

        assert_eq!(record.query_id, "query_001");
        assert_eq!(record.subject_id, "id03");
        assert!((record.percent_identity - 62.32).abs() < 1e-9);
        assert_eq!(record.align_length, 138);
        assert_eq!(record.mismatches, 52);
        assert_eq!(record.gap_opens, 0);
        assert_eq!(record.query_end, 138);
        assert!((record.expect_value - 2e-37).abs() < 1e-45);
        assert!((record.bit_score - 154.0).abs() < f64::EPSILON);
        assert_eq!(record.raw_line, line);
        assert_eq!(record.score_columns(), ("2e-37", "154"));
    }

    #[test]
    fn test_ids_are_trimmed() {
        let line = " query_001 \t id03\t62.32\t138\t52\t0\t1\t138\t1\t138\t2e-37\t154";
        let ParsedLine::Record(record) = parse_line(line, 1).unwrap() else {
            panic!("expected a record");
        };

        assert_eq!(record.query_id, "query_001");
        assert_eq!(record.subject_id, "id03");
        assert_eq!(record.raw_line, line);
    }

    #[test]
    fn test_bad_informational_column_is_fatal() {
        let line = "query_001\tid03\t62.32\t138\t52\t0\tstart\t138\t1\t138\t2e-37\t154";
        assert!(matches!(
            parse_line(line, 4),
            Err(ParseError::InvalidNumber { line: 4, column: "qstart", .. })
        ));
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse_line("", 1).unwrap(), ParsedLine::Blank);
        assert_eq!(parse_line("   \t  ", 2).unwrap(), ParsedLine::Blank);
        assert_eq!(parse_line("\r\n", 3).unwrap(), ParsedLine::Blank);
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        let truncated = "query_001\tid03\t62.32\t138\t52";
        assert_eq!(
            parse_line(truncated, 1).unwrap(),
            ParsedLine::Malformed { fields: 5 }
        );

        let extra = "q\ts\t1\t1\t1\t1\t1\t1\t1\t1\t1e-5\t50\textra";
        assert_eq!(
            parse_line(extra, 1).unwrap(),
            ParsedLine::Malformed { fields: 13 }
        );
    }

    #[test]
    fn test_empty_identifier_is_malformed() {
        let line = "\tid03\t62.32\t138\t52\t0\t1\t138\t1\t138\t2e-37\t154";
        assert_eq!(
            parse_line(line, 1).unwrap(),
            ParsedLine::Malformed { fields: 12 }
        );
    }

    #[test]
    fn test_bad_evalue_is_fatal() {
        let line = "query_001\tid03\t62.32\t138\t52\t0\t1\t138\t1\t138\tnot-a-number\t154";
        let err = parse_line(line, 7).unwrap_err();
        match err {
            ParseError::InvalidNumber { line, column, value } => {
                assert_eq!(line, 7);
                assert_eq!(column, "evalue");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_bitscore_is_fatal() {
        let line = "q\ts\t62.32\t138\t52\t0\t1\t138\t1\t138\t1e-5\tNaN";
        assert!(matches!(
            parse_line(line, 1),
            Err(ParseError::InvalidNumber { column: "bitscore", .. })
        ));
    }

    #[test]
    fn test_negative_evalue_is_fatal() {
        let line = "q\ts\t62.32\t138\t52\t0\t1\t138\t1\t138\t-1\t50";
        assert!(matches!(
            parse_line(line, 1),
            Err(ParseError::InvalidNumber { column: "evalue", .. })
        ));
    }

    #[test]
    fn test_crlf_is_stripped_from_raw_line() {
        let line = "q\ts\t62.32\t138\t52\t0\t1\t138\t1\t138\t1e-5\t50.5\r";
        let ParsedLine::Record(record) = parse_line(line, 1).unwrap() else {
            panic!("expected a record");
        };
        assert!(!record.raw_line.ends_with('\r'));
        assert_eq!(record.score_columns(), ("1e-5", "50.5"));
    }
}
