//! In-memory workbook storage for Tabula.
//!
//! A [`Workbook`] is an ordered list of named [`Worksheet`]s; sheets and rows
//! are sparse, so only populated rows and cells take memory.
//!
//! # Features
//!
//! - **Cells**: typed values (blank, text, numeric, date) with a small style
//!   record (alignment, locked, bold, number format)
//! - **Container format**: magic bytes, schema version and a JSON payload,
//!   via [`Workbook::to_bytes`] / [`Workbook::from_bytes`]
//! - **Atomic saves**: [`Workbook::save`] writes through a temp file
//! - **CSV import**: [`Workbook::from_csv`]
//! - **Spreadsheet import**: [`Workbook::from_xlsx`] reads `.xlsx` files
//!
//! # Example
//!
//! ```
//! use tabula_table::{CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Planilha1");
//! sheet.set_cell_value(0, 0, "Coluna A");
//! sheet.set_cell_value(1, 0, 10.0);
//!
//! let bytes = Workbook::with_sheet(sheet).to_bytes()?;
//! let workbook = Workbook::from_bytes(&bytes)?;
//! let cell = workbook.sheet(0).and_then(|s| s.row(1)).and_then(|r| r.cell(0));
//! assert_eq!(cell.map(|c| &c.value), Some(&CellValue::Number(10.0)));
//! # Ok::<(), tabula_table::TableError>(())
//! ```

pub mod cell;
pub mod error;
pub mod import;
pub mod io;
pub mod sheet;
pub mod workbook;
pub mod xlsx;

// === Cells ===
pub use cell::{
    Cell, CellStyle, CellType, CellValue, DATE_DISPLAY_FORMAT, HorizontalAlignment,
    VerticalAlignment,
};

// === Structure ===
pub use sheet::{Row, Worksheet};
pub use workbook::Workbook;

// === Container ===
pub use io::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES};
pub use xlsx::XLSX_SIGNATURE;

pub use error::{Result, TableError};
