//! Column mappings.
//!
//! A [`ColumnMapping`] lists, in declaration order, the named columns a
//! record type is decoded from and the field each one feeds. Mappings are
//! built once per record type and shared by every reader; nothing in a
//! mapping changes after it is declared.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};
use crate::field::Field;
use crate::names::{fold_name, names_match};

/// Whether a column must be present in the source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    Required,
    Optional,
}

/// A declared column: its name, requirement level and target field.
pub struct Tag<R> {
    name: String,
    folded: String,
    requirement: Requirement,
    field: Field<R>,
}

impl<R> Tag<R> {
    /// Declared column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }

    pub fn field(&self) -> &Field<R> {
        &self.field
    }

    /// True when a header label names this tag, ignoring case and diacritics.
    pub fn matches(&self, label: &str) -> bool {
        self.folded == fold_name(label)
    }
}

impl<R> fmt::Debug for Tag<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("name", &self.name)
            .field("requirement", &self.requirement)
            .field("kind", &self.field.kind())
            .finish()
    }
}

/// Ordered set of tags describing how `R` is decoded from a header-bearing
/// table.
///
/// ```
/// use tabula_model::{ColumnMapping, field};
///
/// #[derive(Default)]
/// struct Product {
///     code: String,
///     price: Option<f64>,
/// }
///
/// let mapping = ColumnMapping::new()
///     .required("Code", field!(Product, code))?
///     .optional("Price", field!(Product, price))?;
/// assert_eq!(mapping.len(), 2);
///
/// // Names are unique ignoring case and accents.
/// assert!(mapping.required("CODE", field!(Product, code)).is_err());
/// # Ok::<(), tabula_model::MappingError>(())
/// ```
pub struct ColumnMapping<R> {
    tags: Vec<Tag<R>>,
}

impl<R> ColumnMapping<R> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Appends a tag.
    ///
    /// Fails with [`MappingError::DuplicateTag`] when a tag with the same name
    /// (ignoring case and diacritics) is already registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        field: Field<R>,
        requirement: Requirement,
    ) -> Result<()> {
        let name = name.into();
        if self.tags.iter().any(|tag| names_match(&tag.name, &name)) {
            return Err(MappingError::DuplicateTag { name });
        }
        let folded = fold_name(&name);
        self.tags.push(Tag {
            name,
            folded,
            requirement,
            field,
        });
        Ok(())
    }

    /// Builder form of [`register`](Self::register) for a required column.
    pub fn required(mut self, name: impl Into<String>, field: Field<R>) -> Result<Self> {
        self.register(name, field, Requirement::Required)?;
        Ok(self)
    }

    /// Builder form of [`register`](Self::register) for an optional column.
    pub fn optional(mut self, name: impl Into<String>, field: Field<R>) -> Result<Self> {
        self.register(name, field, Requirement::Optional)?;
        Ok(self)
    }

    /// Tags in declaration order.
    pub fn tags(&self) -> &[Tag<R>] {
        &self.tags
    }

    /// Position and tag matching a header label.
    pub fn find(&self, label: &str) -> Option<(usize, &Tag<R>)> {
        let folded = fold_name(label);
        self.tags
            .iter()
            .enumerate()
            .find(|(_, tag)| tag.folded == folded)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<R> Default for ColumnMapping<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for ColumnMapping<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnMapping")
            .field("tags", &self.tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;

    #[derive(Debug, Default)]
    struct Row {
        a: String,
        b: Option<f64>,
    }

    #[test]
    fn test_register_keeps_declaration_order() {
        let mapping = ColumnMapping::new()
            .required("Coluna B", field!(Row, b))
            .and_then(|m| m.optional("Coluna A", field!(Row, a)))
            .unwrap();

        let names: Vec<&str> = mapping.tags().iter().map(Tag::name).collect();
        assert_eq!(names, vec!["Coluna B", "Coluna A"]);
        assert!(mapping.tags()[0].is_required());
        assert_eq!(mapping.tags()[1].requirement(), Requirement::Optional);
    }

    #[test]
    fn test_find_ignores_case_and_accents() {
        let mapping = ColumnMapping::new()
            .required("Coluna A", field!(Row, a))
            .unwrap();

        let (position, tag) = mapping.find("COLUNÁ a").expect("tag found");
        assert_eq!(position, 0);
        assert_eq!(tag.name(), "Coluna A");
        assert!(mapping.find("Discard").is_none());
    }

    #[test]
    fn test_debug_lists_tags() {
        let mapping = ColumnMapping::new()
            .required("Coluna A", field!(Row, a))
            .unwrap();
        let debug = format!("{mapping:?}");
        assert!(debug.contains("Coluna A"));
        assert!(debug.contains("Text"));
    }
}
