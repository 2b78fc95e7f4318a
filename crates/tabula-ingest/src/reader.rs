//! Row-by-row import of records from a workbook sheet.

use std::collections::BTreeMap;
use std::path::Path;

use tabula_model::{ColumnMapping, SourceRecord};
use tabula_table::{Cell, Row, Workbook, Worksheet};
use tabula_validate::{HeaderSummary, ValidationFailure, ValidationResult, validate_structure};

use crate::coerce::coerce;
use crate::error::{IngestError, Result};
use crate::header::{Header, HeaderBinding};
use crate::log::ErrorLog;
use crate::options::{ReaderOptions, SheetSelector};

/// Workbooks owned by an open reader.
#[derive(Debug)]
struct OpenState {
    source: Workbook,
    sheet_index: usize,
    log: ErrorLog,
}

impl OpenState {
    fn sheet(&self) -> Result<&Worksheet> {
        self.source
            .sheet(self.sheet_index)
            .ok_or_else(|| IngestError::SheetNotFound {
                selector: format!("#{}", self.sheet_index),
            })
    }
}

/// Reads records of type `R` from one sheet, following a borrowed
/// [`ColumnMapping`].
///
/// The reader keeps a cursor over the data rows, a copy of the sheet used as
/// an error log, and the accumulated structural validation result. All of it
/// is released by [`close`](Self::close) or on drop.
///
/// ```
/// use tabula_ingest::ImportReader;
/// use tabula_model::{ColumnMapping, field};
/// use tabula_table::Workbook;
///
/// #[derive(Debug, Default)]
/// struct Product {
///     code: String,
///     price: Option<f64>,
/// }
///
/// let mapping = ColumnMapping::new()
///     .required("Code", field!(Product, code))?
///     .optional("Preço", field!(Product, price))?;
///
/// let csv = "code,preco\nA-1,9.5\n,\nB-2,\n";
/// let workbook = Workbook::from_csv("Products", csv.as_bytes())?;
/// let mut reader = ImportReader::from_workbook(workbook, &mapping, Default::default())?;
///
/// let products = reader.read_all()?;
/// assert_eq!(products.len(), 2);
/// assert_eq!(products[0].price, Some(9.5));
/// assert_eq!(products[1].row_index(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ImportReader<'m, R> {
    mapping: &'m ColumnMapping<R>,
    options: ReaderOptions,
    state: Option<OpenState>,
    sheet_name: String,
    header: Header,
    binding: HeaderBinding,
    current_line: usize,
    current_row: usize,
    valid_rows: Option<usize>,
    validation: ValidationResult,
}

impl<'m, R: Default> ImportReader<'m, R> {
    /// Opens the first sheet of a workbook container or `.xlsx` file.
    pub fn open(bytes: &[u8], mapping: &'m ColumnMapping<R>) -> Result<Self> {
        Self::with_options(bytes, mapping, ReaderOptions::default())
    }

    /// Opens the sheet named `sheet_name` of a workbook container or `.xlsx`
    /// file.
    pub fn open_sheet(
        bytes: &[u8],
        sheet_name: &str,
        mapping: &'m ColumnMapping<R>,
    ) -> Result<Self> {
        Self::with_options(
            bytes,
            mapping,
            ReaderOptions::new().with_sheet_name(sheet_name),
        )
    }

    /// Opens a workbook container or `.xlsx` file from disk.
    pub fn open_file(
        path: &Path,
        mapping: &'m ColumnMapping<R>,
        options: ReaderOptions,
    ) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_options(&bytes, mapping, options)
    }

    /// Opens workbook bytes with explicit options.
    ///
    /// Bytes starting with the zip signature are read as an `.xlsx` file,
    /// anything else as a workbook container.
    pub fn with_options(
        bytes: &[u8],
        mapping: &'m ColumnMapping<R>,
        options: ReaderOptions,
    ) -> Result<Self> {
        let workbook = if Workbook::is_xlsx(bytes) {
            Workbook::from_xlsx(bytes)?
        } else {
            Workbook::from_bytes(bytes)?
        };
        Self::from_workbook(workbook, mapping, options)
    }

    /// Reads from an already decoded workbook.
    pub fn from_workbook(
        source: Workbook,
        mapping: &'m ColumnMapping<R>,
        options: ReaderOptions,
    ) -> Result<Self> {
        let sheet_index = match &options.sheet {
            SheetSelector::Index(index) if *index < source.sheet_count() => Some(*index),
            SheetSelector::Index(_) => None,
            SheetSelector::Name(name) => source.sheet_index(name),
        }
        .ok_or_else(|| IngestError::SheetNotFound {
            selector: options.sheet.to_string(),
        })?;

        let log = ErrorLog::new(&source, sheet_index, &options)?;
        let state = OpenState {
            source,
            sheet_index,
            log,
        };

        let sheet = state.sheet()?;
        let sheet_name = sheet.name().to_string();
        let header = Header::from_row(sheet.row(0));
        let binding = HeaderBinding::resolve(&header, mapping);

        tracing::info!(
            sheet = %sheet_name,
            rows = sheet.row_count(),
            columns = header.len(),
            bound = binding.bound_count(),
            tags = mapping.len(),
            "opened import reader"
        );

        Ok(Self {
            mapping,
            options,
            state: Some(state),
            sheet_name,
            header,
            binding,
            current_line: 0,
            current_row: 0,
            valid_rows: None,
            validation: ValidationResult::new(),
        })
    }

    /// Decodes the next non-blank data row, or `None` past the last row.
    pub fn read_next(&mut self) -> Result<Option<SourceRecord<R>>> {
        let state = self.state.as_ref().ok_or(IngestError::Closed)?;
        let sheet = state.sheet()?;
        let Some(last) = sheet.last_row_index() else {
            return Ok(None);
        };

        while self.current_line < last {
            self.current_line += 1;
            match sheet.row(self.current_line) {
                Some(row) if !row.is_blank() => {
                    self.current_row = self.current_line;
                    return Ok(Some(decode_row(
                        self.mapping,
                        &self.binding,
                        row,
                        self.current_line,
                    )));
                }
                _ => tracing::trace!(row = self.current_line, "skipped blank row"),
            }
        }
        Ok(None)
    }

    /// Reads every remaining record.
    pub fn read_all(&mut self) -> Result<Vec<SourceRecord<R>>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Iterates over the remaining records.
    pub fn records(&mut self) -> Records<'_, 'm, R> {
        Records {
            reader: self,
            failed: false,
        }
    }
}

impl<'m, R> ImportReader<'m, R> {
    /// Header labels by column index.
    pub fn header(&self) -> BTreeMap<usize, String> {
        self.header.to_map()
    }

    pub fn header_binding(&self) -> &HeaderBinding {
        &self.binding
    }

    pub fn mapping(&self) -> &'m ColumnMapping<R> {
        self.mapping
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// One past the last row index of the source sheet (header included).
    pub fn row_count(&self) -> Result<usize> {
        let state = self.state.as_ref().ok_or(IngestError::Closed)?;
        Ok(state.sheet()?.row_count())
    }

    /// Cursor position: 0 before the first read, then the last row visited.
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// Number of non-blank data rows. Scanned once, then cached.
    pub fn count_valid_rows(&mut self) -> Result<usize> {
        let state = self.state.as_ref().ok_or(IngestError::Closed)?;
        if let Some(count) = self.valid_rows {
            return Ok(count);
        }

        let count = state
            .sheet()?
            .rows()
            .filter(|(index, row)| *index > 0 && !row.is_blank())
            .count();
        self.valid_rows = Some(count);
        Ok(count)
    }

    pub(crate) fn preset_valid_rows(&mut self, count: usize) {
        self.valid_rows = Some(count);
    }

    /// Runs the structural checks and adds their failures to the reader's
    /// result. Failures accumulate across calls.
    pub fn validate(&mut self) -> Result<&ValidationResult> {
        let data_rows = self.count_valid_rows()?;
        let summary = HeaderSummary {
            data_rows,
            labels: self.header.labels().map(|(_, label)| label).collect(),
            missing_required: self.binding.missing_required(self.mapping),
        };
        let outcome = validate_structure(&summary);
        self.validation.merge(outcome);
        Ok(&self.validation)
    }

    /// True while no structural failure has been recorded.
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn validation_errors(&self) -> &[ValidationFailure] {
        &self.validation.errors
    }

    /// Logs a failure for the row of the last record read, or the header
    /// before any record was read.
    pub fn log_errors<I, S>(&mut self, messages: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.log_errors_at(self.current_row, messages)
    }

    /// Logs a failure for source row `row_index`.
    pub fn log_errors_at<I, S>(&mut self, row_index: usize, messages: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.state.as_mut().ok_or(IngestError::Closed)?;
        let row: Row = state
            .sheet()?
            .row(row_index)
            .cloned()
            .ok_or_else(|| IngestError::RowNotFound {
                sheet: self.sheet_name.clone(),
                row_index,
            })?;
        state.log.log(&row, messages)
    }

    /// True once at least one failure was logged.
    pub fn has_errors(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.log.has_errors())
    }

    /// Number of failures logged.
    pub fn error_count(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |state| state.log.error_count())
    }

    /// The log workbook.
    pub fn error_log(&self) -> Result<&ErrorLog> {
        self.state
            .as_ref()
            .map(|state| &state.log)
            .ok_or(IngestError::Closed)
    }

    /// Serialized log workbook.
    pub fn export_log(&self) -> Result<Vec<u8>> {
        self.error_log()?.to_bytes()
    }

    /// Writes the log workbook to `path`.
    pub fn save_log(&self, path: &Path) -> Result<()> {
        self.error_log()?.save(path)
    }

    /// Releases both workbooks. Later reads, logs and exports fail with
    /// [`IngestError::Closed`].
    pub fn close(&mut self) {
        if self.state.take().is_some() {
            tracing::debug!(sheet = %self.sheet_name, "closed import reader");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }
}

fn decode_row<R: Default>(
    mapping: &ColumnMapping<R>,
    binding: &HeaderBinding,
    row: &Row,
    row_index: usize,
) -> SourceRecord<R> {
    let mut record = R::default();
    for (tag, column) in binding.bound(mapping) {
        let Some(raw) = row.cell(column).and_then(Cell::decoded) else {
            continue;
        };
        let field = tag.field();
        if let Some(value) = coerce(field.kind(), raw) {
            field.write(&mut record, value);
        }
    }
    SourceRecord::new(row_index, record)
}

/// Iterator over the remaining records of a reader.
///
/// Stops after the first error.
pub struct Records<'r, 'm, R> {
    reader: &'r mut ImportReader<'m, R>,
    failed: bool,
}

impl<R: Default> Iterator for Records<'_, '_, R> {
    type Item = Result<SourceRecord<R>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.reader.read_next().transpose();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}
