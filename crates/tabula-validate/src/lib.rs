//! Structural validation for Tabula imports.
//!
//! Checks run on a [`HeaderSummary`] and never short-circuit; every failure
//! found is reported in the [`ValidationResult`]:
//!
//! - [`ErrorCode::EmptySheet`]: no data row holds a value
//! - [`ErrorCode::InvalidHeader`]: a required column is missing
//! - [`ErrorCode::DuplicatedTags`]: the header repeats a label
//!
//! # Example
//!
//! ```
//! use tabula_validate::{ErrorCode, HeaderSummary, validate_structure};
//!
//! let summary = HeaderSummary {
//!     data_rows: 2,
//!     labels: vec!["Coluna A", "coluna a"],
//!     missing_required: vec![],
//! };
//! let result = validate_structure(&summary);
//! assert!(!result.is_valid());
//! assert_eq!(result.errors[0].code, ErrorCode::DuplicatedTags);
//! ```

pub mod checks;
pub mod issue;
pub mod result;

pub use checks::{
    HeaderSummary, check_duplicates, check_empty, check_required, check_structure,
    validate_structure,
};
pub use issue::{ErrorCode, Issue};
pub use result::{ValidationFailure, ValidationResult};
