//! Structural issue types.
//!
//! Each variant carries only the data its message needs.

use serde::{Deserialize, Serialize};

/// Stable code of a structural failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// No data row holds a value.
    EmptySheet,
    /// At least one required column is absent from the header.
    InvalidHeader,
    /// The header repeats a label (case-insensitively).
    DuplicatedTags,
}

impl ErrorCode {
    /// Base message shown for this code.
    pub fn base_message(self) -> &'static str {
        match self {
            Self::EmptySheet => "The supplied file contains no records.",
            Self::InvalidHeader => "The supplied file does not have all the required columns.",
            Self::DuplicatedTags => "The supplied file has duplicate identifiers in the header.",
        }
    }
}

/// A structural problem found in a source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    EmptySheet,
    /// Required columns not found in the header, in declaration order.
    MissingColumns { columns: Vec<String> },
    /// Header labels that occur more than once, as first written.
    DuplicateLabels { labels: Vec<String> },
}

impl Issue {
    pub fn code(&self) -> ErrorCode {
        match self {
            Issue::EmptySheet => ErrorCode::EmptySheet,
            Issue::MissingColumns { .. } => ErrorCode::InvalidHeader,
            Issue::DuplicateLabels { .. } => ErrorCode::DuplicatedTags,
        }
    }

    /// Message with issue-specific data appended to the base message.
    pub fn message(&self) -> String {
        let base = self.code().base_message();
        match self {
            Issue::EmptySheet => base.to_string(),
            Issue::MissingColumns { columns } if !columns.is_empty() => {
                format!("{base} Missing: {}.", columns.join(", "))
            }
            Issue::DuplicateLabels { labels } if !labels.is_empty() => {
                format!("{base} Duplicated: {}.", labels.join(", "))
            }
            Issue::MissingColumns { .. } | Issue::DuplicateLabels { .. } => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Issue::EmptySheet.code(), ErrorCode::EmptySheet);
        assert_eq!(
            Issue::MissingColumns { columns: vec![] }.code(),
            ErrorCode::InvalidHeader
        );
        assert_eq!(
            Issue::DuplicateLabels { labels: vec![] }.code(),
            ErrorCode::DuplicatedTags
        );
    }

    #[test]
    fn test_messages_name_the_columns() {
        assert_eq!(
            Issue::EmptySheet.message(),
            "The supplied file contains no records."
        );
        assert_eq!(
            Issue::MissingColumns {
                columns: vec!["Coluna D".into(), "Coluna E".into()]
            }
            .message(),
            "The supplied file does not have all the required columns. Missing: Coluna D, Coluna E."
        );
        assert_eq!(
            Issue::DuplicateLabels { labels: vec![] }.message(),
            "The supplied file has duplicate identifiers in the header."
        );
    }
}
