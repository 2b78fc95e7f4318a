//! Reader configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the column failures are written to in the log.
pub const DEFAULT_ERRORS_COLUMN: &str = "Errors";

/// Separator between messages of one logged failure.
pub const DEFAULT_ERROR_SEPARATOR: &str = " | ";

/// Which sheet of the workbook to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSelector {
    /// 0-based sheet position.
    Index(usize),
    /// Exact sheet name.
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Options for an import reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Sheet to read (default: the first one).
    pub sheet: SheetSelector,

    /// Header label of the error column in the log.
    pub errors_column: String,

    /// Separator used to join the messages of one failure.
    pub error_separator: String,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::default(),
            errors_column: DEFAULT_ERRORS_COLUMN.to_string(),
            error_separator: DEFAULT_ERROR_SEPARATOR.to_string(),
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet_index(mut self, index: usize) -> Self {
        self.sheet = SheetSelector::Index(index);
        self
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet = SheetSelector::Name(name.into());
        self
    }

    pub fn with_errors_column(mut self, label: impl Into<String>) -> Self {
        self.errors_column = label.into();
        self
    }

    pub fn with_error_separator(mut self, separator: impl Into<String>) -> Self {
        self.error_separator = separator.into();
        self
    }
}
