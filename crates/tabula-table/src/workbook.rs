//! Workbooks: ordered collections of named sheets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::sheet::Worksheet;

/// An ordered collection of uniquely named sheets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a workbook holding a single sheet.
    pub fn with_sheet(sheet: Worksheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }

    /// Appends a sheet and returns its index.
    pub fn add_sheet(&mut self, sheet: Worksheet) -> Result<usize> {
        if self.sheet_index(sheet.name()).is_some() {
            return Err(TableError::DuplicateSheet {
                name: sheet.name().to_string(),
            });
        }
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Fails on the first sheet name already used by an earlier sheet.
    pub(crate) fn ensure_unique_names(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in self.sheet_names() {
            if !seen.insert(name) {
                return Err(TableError::DuplicateSheet {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(Worksheet::name)
    }

    /// Index of the sheet with this exact name.
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|sheet| sheet.name() == name)
    }

    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).and_then(|index| self.sheet(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_lookup() {
        let mut workbook = Workbook::new();
        assert_eq!(workbook.add_sheet(Worksheet::new("Planilha1")).unwrap(), 0);
        assert_eq!(workbook.add_sheet(Worksheet::new("Planilha3")).unwrap(), 1);

        assert_eq!(workbook.sheet_count(), 2);
        assert_eq!(workbook.sheet_index("Planilha3"), Some(1));
        assert!(workbook.sheet_by_name("planilha3").is_none());
        assert_eq!(
            workbook.sheet_names().collect::<Vec<_>>(),
            vec!["Planilha1", "Planilha3"]
        );
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let mut workbook = Workbook::with_sheet(Worksheet::new("Data"));
        let err = workbook.add_sheet(Worksheet::new("Data")).unwrap_err();
        assert!(matches!(err, TableError::DuplicateSheet { name } if name == "Data"));
    }
}
