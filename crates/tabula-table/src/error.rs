//! Error types for workbook storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, loading or saving workbooks.
#[derive(Debug, Error)]
pub enum TableError {
    // === Container Errors ===
    /// Bytes are not a workbook container.
    #[error("invalid workbook format: {reason}")]
    InvalidFormat { reason: String },

    /// Container written by a newer schema.
    #[error("workbook version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// Failed to encode the workbook payload.
    #[error("failed to serialize workbook")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to decode the workbook payload.
    #[error("failed to deserialize workbook")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    // === Import Errors ===
    /// Failed to read a CSV record.
    #[error("failed to read CSV record: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Failed to read an `.xlsx` file.
    #[error("failed to read xlsx workbook: {source}")]
    Xlsx {
        #[source]
        source: calamine::XlsxError,
    },

    // === Structure Errors ===
    /// A sheet with this name already exists in the workbook.
    #[error("sheet '{name}' already exists")]
    DuplicateSheet { name: String },

    // === File System Errors ===
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("failed to complete save to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for TableError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}

impl From<calamine::XlsxError> for TableError {
    fn from(source: calamine::XlsxError) -> Self {
        Self::Xlsx { source }
    }
}

/// Result type for workbook operations.
pub type Result<T> = std::result::Result<T, TableError>;
