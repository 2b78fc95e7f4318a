//! Rows and worksheets.
//!
//! Both are sparse: a row only holds the cells that were created, and a
//! sheet only holds the rows that were created. Missing rows and cells read
//! as `None`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellValue};

/// A sheet row, keyed by 0-based column index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: BTreeMap<usize, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from consecutive values starting at column 0.
    /// Blank values create no cell.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut row = Self::new();
        for (column, value) in values.into_iter().enumerate() {
            let value = value.into();
            if value != CellValue::Blank {
                row.set_cell(column, Cell::new(value));
            }
        }
        row
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(&column)
    }

    pub fn cell_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.cells.get_mut(&column)
    }

    /// Returns the cell at `column`, creating a blank one if absent.
    pub fn create_cell(&mut self, column: usize) -> &mut Cell {
        self.cells.entry(column).or_default()
    }

    pub fn set_cell(&mut self, column: usize, cell: Cell) {
        self.cells.insert(column, cell);
    }

    pub fn remove_cell(&mut self, column: usize) -> Option<Cell> {
        self.cells.remove(&column)
    }

    /// Cells in ascending column order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().map(|(column, cell)| (*column, cell))
    }

    /// Number of physical cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn last_cell_index(&self) -> Option<usize> {
        self.cells.keys().next_back().copied()
    }

    /// True when no cell holds a non-null decoded value.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|cell| cell.decoded().is_none())
    }
}

/// A named sheet, keyed by 0-based row index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<usize, Row>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Builds a sheet from consecutive rows starting at row 0.
    pub fn from_rows<I>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut sheet = Self::new(name);
        for (index, row) in rows.into_iter().enumerate() {
            sheet.insert_row(index, row);
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(&index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(&index)
    }

    /// Returns the row at `index`, creating an empty one if absent.
    pub fn create_row(&mut self, index: usize) -> &mut Row {
        self.rows.entry(index).or_default()
    }

    pub fn insert_row(&mut self, index: usize, row: Row) {
        self.rows.insert(index, row);
    }

    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        self.rows.remove(&index)
    }

    /// Rows in ascending index order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().map(|(index, row)| (*index, row))
    }

    pub fn last_row_index(&self) -> Option<usize> {
        self.rows.keys().next_back().copied()
    }

    /// One past the last row index, 0 for an empty sheet.
    pub fn row_count(&self) -> usize {
        self.last_row_index().map_or(0, |last| last + 1)
    }

    /// Writes a value into a cell, creating row and cell as needed.
    pub fn set_cell_value(&mut self, row: usize, column: usize, value: impl Into<CellValue>) {
        self.create_row(row).create_cell(column).set_value(value);
    }

    /// Copies every cell of `source` (value and style) into row `index`.
    pub fn clone_row(&mut self, source: &Row, index: usize) -> &mut Row {
        let target = self.create_row(index);
        for (column, cell) in source.cells() {
            target.create_cell(column).clone_from_cell(cell);
        }
        target
    }
}
