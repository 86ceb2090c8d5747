//! Reader for the hand-maintained activity table
//!
//! Each line holds `date,label`. There is no header. Fields beyond the second are
//! ignored, blank lines are skipped, and a line holding only a date yields a row
//! without a label.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{ActivityLogError, Result};
use crate::normalize::RawRow;

/// Field separator in the table
pub const FIELD_SEPARATOR: char = ',';

/// Lazy iterator over the rows of a table
///
/// Consumes its source once; it cannot be restarted.
#[derive(Debug)]
pub struct TableReader<R> {
    lines: Lines<R>,
    line: usize,
    source: PathBuf,
}

impl<R: BufRead> TableReader<R> {
    /// Read rows from any buffered source
    pub fn new(reader: R) -> Self {
        Self::with_source(reader, PathBuf::from("<input>"))
    }

    /// Read rows from a buffered source, naming it in I/O errors
    pub fn with_source(reader: R, source: impl Into<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            source: source.into(),
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl TableReader<BufReader<File>> {
    /// Open a table file
    ///
    /// # Errors
    /// Returns an `Io` error if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ActivityLogError::io(path, e))?;
        Ok(Self::with_source(BufReader::new(file), path))
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ActivityLogError::io(&self.source, e))),
            };
            self.line += 1;

            let content = if self.line == 1 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };

            if content.trim().is_empty() {
                continue;
            }

            return Some(Ok(parse_line(content, self.line)));
        }
    }
}

/// Split one table line into a raw row tagged with its line number
#[must_use]
pub fn parse_line(line: &str, line_number: usize) -> RawRow {
    let mut fields = line.split(FIELD_SEPARATOR);
    let date = fields.next().unwrap_or_default().trim();

    let row = match fields.next() {
        Some(label) => RawRow::new(date, label.trim()),
        None => RawRow::unlabeled(date),
    };
    row.at_line(line_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn rows(input: &str) -> Vec<Result<RawRow>> {
        TableReader::new(Cursor::new(input)).collect()
    }

    #[test]
    fn test_reads_rows_with_whitespace() {
        let rows = rows(" 2024/3/10 , swim \n2024/3/11,\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].as_ref().unwrap(),
            &RawRow::new("2024/3/10", "swim").at_line(1)
        );
        assert_eq!(rows[1].as_ref().unwrap(), &RawRow::new("2024/3/11", "").at_line(2));
    }

    #[test]
    fn test_blank_lines_and_bom_are_skipped() {
        let rows = rows("\u{feff}2024/3/10,hiit\n\n   \n2024/3/12,soccer");
        let rows: Vec<RawRow> = rows.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            rows,
            vec![
                RawRow::new("2024/3/10", "hiit").at_line(1),
                RawRow::new("2024/3/12", "soccer").at_line(4)
            ]
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let rows = rows("2024/3/10,swim,2km\n");
        assert_eq!(
            rows[0].as_ref().unwrap(),
            &RawRow::new("2024/3/10", "swim").at_line(1)
        );
    }

    #[test]
    fn test_date_only_line_has_no_label() {
        let rows = rows("2024/3/10,swim\n 2024/3/11 \n");
        let row = rows[1].as_ref().unwrap();
        assert_eq!(row, &RawRow::unlabeled("2024/3/11").at_line(2));
        assert_eq!(row.activity(), None);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let mut reader = TableReader::new(Cursor::new("\n\n2024/13/1,hiit\n"));
        let row = reader.next().unwrap().unwrap();
        assert_eq!(row.line, Some(3));
        assert!(reader.next().is_none());
        assert_eq!(reader.lines_read(), 3);
    }
}
