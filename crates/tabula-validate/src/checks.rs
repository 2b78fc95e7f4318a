//! Structural checks.
//!
//! Every check runs on a [`HeaderSummary`], a storage-independent view of
//! the source: how many data rows hold values, which labels the header
//! carries and which required columns could not be bound.

use std::collections::HashMap;

use crate::issue::Issue;
use crate::result::ValidationResult;

/// What the checks need to know about a source table.
#[derive(Debug, Clone, Default)]
pub struct HeaderSummary<'a> {
    /// Non-blank data rows (the header excluded).
    pub data_rows: usize,
    /// Header labels in column order.
    pub labels: Vec<&'a str>,
    /// Required columns with no matching header label, in declaration order.
    pub missing_required: Vec<&'a str>,
}

/// Fails when the source has no non-blank data row.
pub fn check_empty(data_rows: usize) -> Option<Issue> {
    (data_rows == 0).then_some(Issue::EmptySheet)
}

/// Fails when any required column is missing.
pub fn check_required(missing: &[&str]) -> Option<Issue> {
    if missing.is_empty() {
        return None;
    }
    Some(Issue::MissingColumns {
        columns: missing.iter().map(|name| (*name).to_string()).collect(),
    })
}

/// Fails when two labels are equal ignoring case.
///
/// Only case is folded here; labels that differ by accents alone are
/// distinct.
pub fn check_duplicates(labels: &[&str]) -> Option<Issue> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut repeated: Vec<String> = Vec::new();

    for label in labels {
        let count = seen.entry(label.to_lowercase()).or_insert(0);
        *count += 1;
        if *count == 2 {
            repeated.push(first_spelling(labels, label));
        }
    }

    (!repeated.is_empty()).then_some(Issue::DuplicateLabels { labels: repeated })
}

fn first_spelling(labels: &[&str], label: &str) -> String {
    let key = label.to_lowercase();
    labels
        .iter()
        .find(|candidate| candidate.to_lowercase() == key)
        .copied()
        .unwrap_or(label)
        .to_string()
}

/// Runs every check, in order: empty sheet, required columns, duplicates.
pub fn check_structure(summary: &HeaderSummary<'_>) -> Vec<Issue> {
    [
        check_empty(summary.data_rows),
        check_required(&summary.missing_required),
        check_duplicates(&summary.labels),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Runs every check and collects the failures.
pub fn validate_structure(summary: &HeaderSummary<'_>) -> ValidationResult {
    let issues = check_structure(summary);
    for issue in &issues {
        tracing::warn!(code = ?issue.code(), "{}", issue.message());
    }

    let mut result = ValidationResult::new();
    result.extend(&issues);
    result
}
