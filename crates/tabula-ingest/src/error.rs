//! Error types for record import.

use std::path::PathBuf;

use tabula_table::TableError;
use thiserror::Error;

/// Errors raised by an import reader.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Storage Errors ===
    /// Workbook could not be decoded, encoded or written.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Requested sheet is not in the workbook.
    #[error("sheet not found: {selector}")]
    SheetNotFound { selector: String },

    /// Requested row does not exist in the source sheet.
    #[error("row {row_index} not found in sheet '{sheet}'")]
    RowNotFound { sheet: String, row_index: usize },

    // === Lifecycle Errors ===
    /// The reader was closed and its workbooks released.
    #[error("import reader is closed")]
    Closed,

    // === File System Errors ===
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::RowNotFound {
            sheet: "Planilha1".to_string(),
            row_index: 42,
        };
        assert_eq!(err.to_string(), "row 42 not found in sheet 'Planilha1'");

        let err = IngestError::from(TableError::InvalidFormat {
            reason: "invalid magic bytes".to_string(),
        });
        assert_eq!(err.to_string(), "invalid workbook format: invalid magic bytes");
    }
}
