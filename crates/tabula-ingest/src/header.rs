//! Source header and its binding to a column mapping.

use std::collections::BTreeMap;

use tabula_model::{ColumnMapping, Tag};
use tabula_table::Row;

/// Header labels of a source sheet, keyed by column index.
///
/// Taken from row 0. Cells without a value carry no label and are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    labels: BTreeMap<usize, String>,
}

impl Header {
    /// Reads the header from the first row of a sheet, if it has one.
    pub fn from_row(row: Option<&Row>) -> Self {
        let labels = row
            .into_iter()
            .flat_map(Row::cells)
            .filter_map(|(column, cell)| {
                cell.decoded()
                    .map(|value| (column, value.to_string()))
            })
            .collect();
        Self { labels }
    }

    pub fn label(&self, column: usize) -> Option<&str> {
        self.labels.get(&column).map(String::as_str)
    }

    /// Labels in ascending column order.
    pub fn labels(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels
            .iter()
            .map(|(column, label)| (*column, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Copy of the labels, as returned to callers.
    pub fn to_map(&self) -> BTreeMap<usize, String> {
        self.labels.clone()
    }
}

/// Column index bound to each tag of a mapping, in tag order.
///
/// Built once per reader. A tag is bound at most once: when two header
/// labels name the same tag, the leftmost wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBinding {
    columns: Vec<Option<usize>>,
}

impl HeaderBinding {
    /// Matches header labels against the mapping's tags, ignoring case and
    /// diacritics. Labels naming no tag are ignored.
    pub fn resolve<R>(header: &Header, mapping: &ColumnMapping<R>) -> Self {
        let mut columns = vec![None; mapping.len()];

        for (column, label) in header.labels() {
            match mapping.find(label) {
                Some((position, tag)) => match columns[position] {
                    None => {
                        tracing::debug!(label, column, tag = tag.name(), "bound header column");
                        columns[position] = Some(column);
                    }
                    Some(bound) => {
                        tracing::debug!(
                            label,
                            column,
                            tag = tag.name(),
                            bound,
                            "tag already bound, ignoring column"
                        );
                    }
                },
                None => tracing::debug!(label, column, "unmapped header column"),
            }
        }

        Self { columns }
    }

    /// Column bound to the tag at `position`.
    pub fn column(&self, position: usize) -> Option<usize> {
        self.columns.get(position).copied().flatten()
    }

    /// Bound column per tag, in tag order.
    pub fn columns(&self) -> &[Option<usize>] {
        &self.columns
    }

    pub fn bound_count(&self) -> usize {
        self.columns.iter().flatten().count()
    }

    /// Pairs every bound tag with its column.
    pub fn bound<'m, R>(
        &'m self,
        mapping: &'m ColumnMapping<R>,
    ) -> impl Iterator<Item = (&'m Tag<R>, usize)> {
        mapping
            .tags()
            .iter()
            .zip(&self.columns)
            .filter_map(|(tag, column)| column.map(|column| (tag, column)))
    }

    /// Names of required tags left unbound, in declaration order.
    pub fn missing_required<'m, R>(&self, mapping: &'m ColumnMapping<R>) -> Vec<&'m str> {
        mapping
            .tags()
            .iter()
            .zip(&self.columns)
            .filter(|(tag, column)| tag.is_required() && column.is_none())
            .map(|(tag, _)| tag.name())
            .collect()
    }
}
