//! Fixed-width text tables and CSV output.

use crate::error::{ClassChartsError, Result};
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Width of the dashes in a separator row.
const SEPARATOR_WIDTH: usize = 10;

/// Lays out `rows` as left-justified columns separated by one space.
///
/// Every cell is padded to the widest cell in its column (last column
/// included) and every row ends with a newline. Nothing is truncated or
/// wrapped. `rows` must be non-empty and rectangular; otherwise an error is
/// returned and nothing is rendered.
pub fn tabulate<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<String> {
    let widths = column_widths(rows)?;

    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Per-column printed width, in characters.
fn column_widths<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Vec<usize>> {
    let Some(first) = rows.first() else {
        return Err(ClassChartsError::precondition("cannot render an empty table"));
    };

    let columns = first.len();
    let mut widths = vec![0; columns];
    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(ClassChartsError::precondition(format!(
                "table row {index} has {} cells, expected {columns}",
                row.len()
            )));
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.as_ref().chars().count());
        }
    }
    Ok(widths)
}

/// A header row followed by data rows, rendered as text or CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        Self {
            rows: vec![header.into_iter().map(|h| h.to_string()).collect()],
        }
    }

    /// Appends a data row. Width mismatches surface when the table is rendered.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        self.rows.push(row.into_iter().map(|c| c.to_string()).collect());
    }

    /// Appends a row of dashes spanning every column.
    pub fn push_separator(&mut self) {
        let dashes = "-".repeat(SEPARATOR_WIDTH);
        self.rows.push(vec![dashes; self.header().len()]);
    }

    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Data rows, header excluded.
    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.len() == 1
    }

    /// Renders the table as aligned text.
    pub fn render(&self) -> Result<String> {
        tabulate(&self.rows)
    }

    /// Renders and writes the table in one go, so a malformed table
    /// produces no output at all.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let text = self.render()?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Writes every row, header first, as CSV.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        column_widths(&self.rows)?;
        let mut writer = csv::Writer::from_writer(out);
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to `path`, replacing any existing file.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        column_widths(&self.rows)?;
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Formats an optional value for a cell; absent renders as an empty cell.
pub fn cell<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_padded_to_widest_cell() {
        let rows = vec![vec!["A", "BB"], vec!["CCC", "D"]];
        assert_eq!(tabulate(&rows).unwrap(), "A   BB\nCCC D \n");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec!["A", "B"], vec!["C"]];
        let err = tabulate(&rows).unwrap_err();
        assert!(matches!(err, ClassChartsError::Precondition { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert!(tabulate(&rows).is_err());
    }

    #[test]
    fn test_width_counts_characters() {
        let rows = vec![vec!["Élève", "x"], vec!["ab", "y"]];
        assert_eq!(tabulate(&rows).unwrap(), "Élève x\nab    y\n");
    }

    #[test]
    fn test_ragged_table_writes_nothing() {
        let mut table = Table::new(["ID", "Name"]);
        table.push_row(["1"]);

        let mut out = Vec::new();
        assert!(table.write_to(&mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_separator_spans_header() {
        let mut table = Table::new(["A", "B", "C"]);
        table.push_separator();
        assert_eq!(table.body()[0], vec!["----------"; 3]);
    }

    #[test]
    fn test_csv_quotes_fields() {
        let mut table = Table::new(["Reason", "Score"]);
        table.push_row(["Helpful, kind", "2"]);

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Reason,Score\n\"Helpful, kind\",2\n"
        );
    }
}
