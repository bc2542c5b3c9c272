//! In-memory tabular data.
//!
//! A [`Table`] is an ordered list of named [`Column`]s. Rows have no identity
//! beyond their position. The column vector is private so that every column
//! keeps the same length for the lifetime of the table; stages mutate cells
//! through slices and drop rows only through [`Table::retain_rows`].

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{CleanError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_missing()).count()
    }

    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Non-missing values with their row index.
    pub fn present(&self) -> impl Iterator<Item = (usize, &CellValue)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_missing())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(column) = columns.iter().find(|column| column.len() != expected) {
                return Err(CleanError::RaggedTable {
                    column: column.name.clone(),
                    expected,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build a table from a header row and row-major cells.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let width = headers.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(CleanError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.columns.get(column)?.values.get(row)
    }

    /// The tuple of values at `idx` across all columns.
    pub fn row(&self, idx: usize) -> Option<Vec<&CellValue>> {
        if idx >= self.height() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| &column.values[idx])
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.height()).filter_map(|idx| self.row(idx))
    }

    /// Mutable access to one column's cells. The slice cannot change length.
    pub fn values_mut(&mut self, column: usize) -> Option<&mut [CellValue]> {
        self.columns
            .get_mut(column)
            .map(|column| column.values.as_mut_slice())
    }

    /// Replace every column name at once.
    pub fn rename_columns(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(CleanError::MaskLength {
                expected: self.columns.len(),
                found: names.len(),
            });
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
        Ok(())
    }

    /// Keep rows whose mask entry is `true`, preserving relative order.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<()> {
        let height = self.height();
        if keep.len() != height {
            return Err(CleanError::MaskLength {
                expected: height,
                found: keep.len(),
            });
        }
        for column in &mut self.columns {
            let mut mask = keep.iter();
            column
                .values
                .retain(|_| mask.next().copied().unwrap_or(false));
        }
        Ok(())
    }

    /// Append a derived column.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.column(&column.name).is_some() {
            return Err(CleanError::DuplicateColumn { name: column.name });
        }
        if !self.columns.is_empty() && column.len() != self.height() {
            return Err(CleanError::RaggedTable {
                expected: self.height(),
                found: column.len(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn total_cells(&self) -> usize {
        self.width() * self.height()
    }

    pub fn missing_cells(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![CellValue::Number(1.0), CellValue::text("x")],
                vec![CellValue::Missing, CellValue::text("y")],
                vec![CellValue::Number(3.0), CellValue::Missing],
            ],
        )
        .expect("build table")
    }

    #[test]
    fn from_rows_is_column_major() {
        let table = sample();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 3);
        assert_eq!(table.cell(1, 1), Some(&CellValue::text("y")));
        assert_eq!(table.missing_cells(), 2);
        assert_eq!(table.total_cells(), 6);
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let err = Table::new(vec![
            Column::new("a", vec![CellValue::Missing]),
            Column::new("b", vec![]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CleanError::RaggedTable {
                column: "b".to_string(),
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::from_rows(vec!["a".to_string()], vec![vec![]]).unwrap_err();
        assert!(matches!(err, CleanError::RaggedRow { row: 0, .. }));
    }

    #[test]
    fn retain_rows_keeps_order_and_lengths() {
        let mut table = sample();
        table.retain_rows(&[true, false, true]).expect("retain");
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(1, 0), Some(&CellValue::Number(3.0)));
        assert!(table.columns().iter().all(|column| column.len() == 2));
    }

    #[test]
    fn retain_rows_rejects_wrong_mask() {
        let mut table = sample();
        assert!(table.retain_rows(&[true]).is_err());
        assert_eq!(table.height(), 3);
    }

    #[test]
    fn push_column_checks_length_and_name() {
        let mut table = sample();
        assert!(table.push_column(Column::new("c", vec![])).is_err());
        assert!(
            table
                .push_column(Column::new("a", vec![CellValue::Missing; 3]))
                .is_err()
        );
        table
            .push_column(Column::new("c", vec![CellValue::Boolean(true); 3]))
            .expect("push");
        assert_eq!(table.width(), 3);
    }
}
