//! Destinations for the finished report table.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::ListError;
use crate::report::{Cell, Report};

/// Anything that accepts a rectangular block of cells at an A1-style range.
pub trait TabularSink {
    fn write_range(&mut self, range: &str, rows: &[Vec<Cell>]) -> Result<(), ListError>;

    /// Write a report's header and rows starting at `A1`.
    fn write_report(&mut self, report: &Report) -> Result<(), ListError> {
        let table = report.with_header();
        let range = range_for(table.len(), report.width());
        self.write_range(&range, &table)
    }
}

/// A1-style reference covering `rows` x `cols` cells anchored at `A1`,
/// e.g. `range_for(12, 5) == "A1:E12"`.
pub fn range_for(rows: usize, cols: usize) -> String {
    format!("A1:{}{}", column_letters(cols.max(1)), rows.max(1))
}

/// Spreadsheet column name for a 1-based column index (1 = A, 27 = AA).
fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Writes the table to a CSV file.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Create (or truncate) the CSV file at `path`.
    pub fn create(path: &Path) -> Result<Self, ListError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = csv::WriterBuilder::new().flexible(false).from_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TabularSink for CsvSink {
    fn write_range(&mut self, range: &str, rows: &[Vec<Cell>]) -> Result<(), ListError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let expected = range_for(rows.len(), width);
        if range != expected {
            return Err(ListError::sink(format!(
                "range {range} does not match a {}x{width} table ({expected})",
                rows.len()
            )));
        }

        for row in rows {
            self.writer
                .write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
