//! Decoded records.

use std::ops::{Deref, DerefMut};

use serde::Serialize;

/// A decoded record together with the physical row it came from.
///
/// The row index is set once, when the record is decoded, and is read-only
/// afterwards. It is 0-based and counts the header as row 0, so the first
/// data row of a sheet is row 1.
///
/// ```compile_fail
/// use tabula_model::SourceRecord;
///
/// let mut record = SourceRecord::new(3, String::from("x"));
/// record.row_index = 4;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRecord<R> {
    row_index: usize,
    record: R,
}

impl<R> SourceRecord<R> {
    pub fn new(row_index: usize, record: R) -> Self {
        Self { row_index, record }
    }

    /// Source row the record was decoded from.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    /// Discards the row position.
    pub fn into_inner(self) -> R {
        self.record
    }
}

impl<R> Deref for SourceRecord<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R> DerefMut for SourceRecord<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}
