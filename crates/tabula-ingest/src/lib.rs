//! Header-driven record import.
//!
//! An [`ImportReader`] reads one sheet of a workbook into records of a
//! caller type, following a [`ColumnMapping`](tabula_model::ColumnMapping):
//!
//! - **Sources**: workbook containers and `.xlsx` files, told apart by their
//!   leading bytes
//! - **Header binding**: header labels are matched to tags ignoring case and
//!   diacritics; unknown columns pass through
//! - **Lenient coercion**: booleans from word lists, dates from a fixed list
//!   of formats, numbers only from numeric cells; anything else is left at
//!   its default
//! - **Blank rows**: skipped when reading and counting
//! - **Error log**: failed rows are cloned into a copy of the sheet with the
//!   messages in an error column, ready to export or save
//! - **Structural validation**: empty sheet, missing required columns and
//!   duplicated header labels
//!
//! # Example
//!
//! ```
//! use tabula_ingest::ImportReader;
//! use tabula_model::{ColumnMapping, field};
//! use tabula_table::{Row, Workbook, Worksheet};
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     name: String,
//!     active: Option<bool>,
//! }
//!
//! let mapping = ColumnMapping::new()
//!     .required("Nome", field!(Person, name))?
//!     .optional("Ativo", field!(Person, active))?;
//!
//! let sheet = Worksheet::from_rows(
//!     "Pessoas",
//!     [
//!         Row::from_values(["NOME", "ativo"]),
//!         Row::from_values(["Ana", "sim"]),
//!         Row::from_values(["", "não"]),
//!     ],
//! );
//! let bytes = Workbook::with_sheet(sheet).to_bytes()?;
//!
//! let mut reader = ImportReader::open(&bytes, &mapping)?;
//! assert!(reader.validate()?.is_valid());
//!
//! while let Some(person) = reader.read_next()? {
//!     if person.name.is_empty() {
//!         reader.log_errors(["Nome is required"])?;
//!     }
//! }
//! assert!(reader.has_errors());
//! let log = reader.export_log()?;
//! # assert!(!log.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod coerce;
mod error;
pub mod header;
pub mod log;
pub mod options;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reader ===
pub use reader::{ImportReader, Records};

// === Building Blocks ===
pub use coerce::coerce;
pub use header::{Header, HeaderBinding};
pub use log::ErrorLog;

// === Configuration ===
pub use options::{DEFAULT_ERROR_SEPARATOR, DEFAULT_ERRORS_COLUMN, ReaderOptions, SheetSelector};
