//! Error log: a copy of the source sheet holding only rows that failed.
//!
//! The log keeps the source header plus an error column. Every logged
//! failure appends a clone of the offending source row (values and styles)
//! and writes the joined messages into the error column.

use std::path::Path;

use tabula_table::{CellStyle, CellValue, Row, VerticalAlignment, Workbook, Worksheet};

use crate::error::{IngestError, Result};
use crate::options::ReaderOptions;

/// Append-only log of failed source rows.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    workbook: Workbook,
    sheet_index: usize,
    errors_label: String,
    separator: String,
    errors_column: Option<usize>,
    error_count: usize,
}

impl ErrorLog {
    /// Copies `source` and prepares sheet `sheet_index` for logging.
    ///
    /// Data rows are dropped and the header gets an error column unless it
    /// already has one. An empty sheet is left empty.
    pub fn new(source: &Workbook, sheet_index: usize, options: &ReaderOptions) -> Result<Self> {
        let mut log = Self {
            workbook: source.clone(),
            sheet_index,
            errors_label: options.errors_column.clone(),
            separator: options.error_separator.clone(),
            errors_column: None,
            error_count: 0,
        };

        let sheet = log.sheet_mut()?;
        if sheet.row_count() == 0 {
            tracing::debug!(sheet = sheet.name(), "source sheet is empty, log left empty");
            return Ok(log);
        }

        let data_rows: Vec<usize> = sheet
            .rows()
            .map(|(index, _)| index)
            .filter(|index| *index > 0)
            .collect();
        for index in data_rows {
            sheet.remove_row(index);
        }

        let column = ensure_errors_column(sheet, &options.errors_column);
        tracing::debug!(
            sheet = sheet.name(),
            column,
            label = %options.errors_column,
            "initialised error log"
        );
        log.errors_column = Some(column);
        Ok(log)
    }

    /// Appends a clone of `row` with `messages` in the error column.
    ///
    /// Returns the log row index written, starting at 1.
    pub fn log<I, S>(&mut self, row: &Row, messages: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = messages
            .into_iter()
            .map(|message| message.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&self.separator);

        let label = self.errors_label.clone();
        let known_column = self.errors_column;
        let index = self.error_count + 1;

        let sheet = self.sheet_mut()?;
        let column = match known_column {
            Some(column) => column,
            None => ensure_errors_column(sheet, &label),
        };

        let target = sheet.clone_row(row, index);
        let cell = target.create_cell(column);
        cell.set_value(CellValue::Text(text));
        cell.style = CellStyle {
            vertical_alignment: VerticalAlignment::Center,
            locked: true,
            ..cell.style.clone()
        };

        self.errors_column = Some(column);
        self.error_count = index;
        tracing::trace!(log_row = index, column, "logged failed row");
        Ok(index)
    }

    /// Number of rows logged so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Column holding the error text, once the log has a header.
    pub fn errors_column(&self) -> Option<usize> {
        self.errors_column
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn sheet(&self) -> Result<&Worksheet> {
        self.workbook
            .sheet(self.sheet_index)
            .ok_or_else(|| IngestError::SheetNotFound {
                selector: format!("#{}", self.sheet_index),
            })
    }

    fn sheet_mut(&mut self) -> Result<&mut Worksheet> {
        let index = self.sheet_index;
        self.workbook
            .sheet_mut(index)
            .ok_or_else(|| IngestError::SheetNotFound {
                selector: format!("#{index}"),
            })
    }

    /// Serializes the log workbook.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.workbook.to_bytes()?)
    }

    /// Writes the log workbook to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.workbook.save(path)?;
        tracing::info!(path = %path.display(), errors = self.error_count, "saved error log");
        Ok(())
    }
}

/// Finds a header cell whose text is exactly `label`, or adds one after the
/// last header cell.
fn ensure_errors_column(sheet: &mut Worksheet, label: &str) -> usize {
    let header = sheet.create_row(0);
    let existing = header
        .cells()
        .find(|(_, cell)| matches!(&cell.value, CellValue::Text(text) if text == label))
        .map(|(column, _)| column);

    match existing {
        Some(column) => column,
        None => {
            let column = header.last_cell_index().map_or(0, |last| last + 1);
            header.create_cell(column).set_value(label);
            column
        }
    }
}
