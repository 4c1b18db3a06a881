use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::parsing::{open_buffered, ParseError};

/// Read an identifier list: one id per line.
///
/// Surrounding whitespace and blank lines are ignored. Ids are returned in
/// first-seen order with duplicates removed.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read.
pub fn read_id_file(path: &Path) -> Result<Vec<String>, ParseError> {
    read_ids(open_buffered(path)?)
}

/// Read an identifier list from any buffered reader.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails.
pub fn read_ids<R: BufRead>(reader: R) -> Result<Vec<String>, ParseError> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if id.is_empty() {
            continue;
        }
        if seen.insert(id.to_string()) {
            ids.push(id.to_string());
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_ids_dedups_in_order() {
        let text = "id03\n\n  id17 \nid03\r\nid22\n";
        let ids = read_ids(Cursor::new(text)).unwrap();
        assert_eq!(ids, vec!["id03", "id17", "id22"]);
    }

    #[test]
    fn test_read_ids_empty() {
        assert!(read_ids(Cursor::new("")).unwrap().is_empty());
    }
}
