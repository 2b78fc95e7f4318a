//! Aggregated validation outcome.

use serde::{Deserialize, Serialize};

use crate::issue::{ErrorCode, Issue};

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&Issue> for ValidationFailure {
    fn from(issue: &Issue) -> Self {
        Self {
            code: issue.code(),
            message: issue.message(),
        }
    }
}

impl AsRef<str> for ValidationFailure {
    fn as_ref(&self) -> &str {
        &self.message
    }
}

/// Ordered list of failures. Valid iff empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: &Issue) {
        self.errors.push(ValidationFailure::from(issue));
    }

    /// Appends every failure of `other`, keeping order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|failure| failure.code == code)
    }

    pub fn count_code(&self, code: ErrorCode) -> usize {
        self.errors.iter().filter(|failure| failure.code == code).count()
    }
}

impl<'a> Extend<&'a Issue> for ValidationResult {
    fn extend<I: IntoIterator<Item = &'a Issue>>(&mut self, issues: I) {
        for issue in issues {
            self.push(issue);
        }
    }
}
