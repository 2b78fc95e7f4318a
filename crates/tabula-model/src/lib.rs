//! Data model for tabular imports.
//!
//! This crate declares *what* is read from a sheet, independently of how the
//! sheet is stored:
//!
//! - **Fields**: [`Field`] descriptors that read and write one field of a
//!   record type, built with the [`field!`] macro
//! - **Mappings**: [`ColumnMapping`], the ordered set of named columns
//!   ([`Tag`]) a record type is decoded from
//! - **Names**: case- and diacritic-insensitive column name folding
//! - **Records**: [`SourceRecord`], a decoded record plus its source row

pub mod error;
pub mod field;
pub mod mapping;
pub mod names;
pub mod record;

pub use error::{MappingError, Result};
pub use field::{Field, FieldKind, FieldType, FieldValue};
pub use mapping::{ColumnMapping, Requirement, Tag};
pub use names::{fold_name, names_match};
pub use record::SourceRecord;
