use std::io::{BufRead, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::core::record::{parse_line, AlignmentRecord, ParsedLine};
use crate::parsing::{open_buffered, ParseError};

/// Streaming reader for 12-column tabular alignment output.
///
/// Blank and malformed lines are skipped but still counted in
/// [`lines_read`](Self::lines_read).
pub struct TabularReader<R> {
    inner: R,
    buf: String,
    lines_read: usize,
    malformed_lines: usize,
}

impl TabularReader<Box<dyn BufRead>> {
    /// Open a tabular file, decompressing `.gz`/`.bgz` files on the fly.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        Ok(Self::new(open_buffered(path)?))
    }
}

impl<R: BufRead> TabularReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            lines_read: 0,
            malformed_lines: 0,
        }
    }

    /// Read the next well-formed record, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` on read failure, `ParseError::InvalidFormat` if
    /// a line is not valid UTF-8, and `ParseError::InvalidNumber` if a numeric
    /// column cannot be parsed.
    pub fn read_record(&mut self) -> Result<Option<AlignmentRecord>, ParseError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_line(&mut self.buf).map_err(|e| {
                if e.kind() == ErrorKind::InvalidData {
                    ParseError::InvalidFormat(format!(
                        "Line {} is not valid UTF-8 text",
                        self.lines_read + 1
                    ))
                } else {
                    ParseError::Io(e)
                }
            })?;
            if bytes == 0 {
                return Ok(None);
            }
            self.lines_read += 1;

            match parse_line(&self.buf, self.lines_read)? {
                ParsedLine::Record(record) => return Ok(Some(record)),
                ParsedLine::Blank => {}
                ParsedLine::Malformed { fields } => {
                    self.malformed_lines += 1;
                    debug!(
                        line = self.lines_read,
                        fields, "Skipping line without 12 tab-separated fields"
                    );
                }
            }
        }
    }

    /// Iterate over the remaining well-formed records
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }

    /// Read every remaining record into memory
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; see [`read_record`](Self::read_record).
    pub fn read_all(&mut self) -> Result<Vec<AlignmentRecord>, ParseError> {
        self.records().collect()
    }

    /// Total lines consumed so far, including blank and malformed lines
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Lines skipped because they did not hold 12 fields
    #[must_use]
    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }
}

pub struct Records<'a, R> {
    reader: &'a mut TabularReader<R>,
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<AlignmentRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}
