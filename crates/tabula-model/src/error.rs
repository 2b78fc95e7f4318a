//! Error types for column mapping declarations.

use thiserror::Error;

/// Errors raised while declaring a column mapping.
///
/// These are programming errors in a static schema, so they are returned
/// immediately and never aggregated with data validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A tag with the same name (ignoring case and diacritics) already exists.
    #[error("the tag '{name}' already exists in the column mapping")]
    DuplicateTag { name: String },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
