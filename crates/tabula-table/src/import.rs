//! CSV import.
//!
//! Each CSV record becomes one sheet row, in file order starting at row 0.
//! Fields are typed the way a spreadsheet would type them on paste: finite
//! numbers become numeric cells, empty fields create no cell and everything
//! else is kept as text.

use std::io::Read;

use csv::ReaderBuilder;

use crate::cell::{Cell, CellValue};
use crate::error::Result;
use crate::sheet::{Row, Worksheet};
use crate::workbook::Workbook;

fn parse_field(raw: &str) -> CellValue {
    let value = raw.trim_matches('\u{feff}');
    if value.is_empty() {
        return CellValue::Blank;
    }
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => CellValue::Number(number),
        _ => CellValue::Text(value.to_string()),
    }
}

impl Worksheet {
    /// Reads a sheet from CSV data. There is no header handling here: the
    /// first record is row 0 like any other.
    pub fn from_csv<Rd: Read>(name: impl Into<String>, reader: Rd) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut sheet = Self::new(name);
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let mut row = Row::new();
            for (column, raw) in record.iter().enumerate() {
                let value = parse_field(raw);
                if value != CellValue::Blank {
                    row.set_cell(column, Cell::new(value));
                }
            }
            sheet.insert_row(index, row);
        }

        tracing::debug!(
            sheet = sheet.name(),
            rows = sheet.row_count(),
            "imported CSV sheet"
        );
        Ok(sheet)
    }
}

impl Workbook {
    /// Builds a single-sheet workbook from CSV data.
    pub fn from_csv<Rd: Read>(sheet_name: impl Into<String>, reader: Rd) -> Result<Self> {
        Ok(Self::with_sheet(Worksheet::from_csv(sheet_name, reader)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;

    #[test]
    fn test_parse_field_typing() {
        assert_eq!(parse_field(""), CellValue::Blank);
        assert_eq!(parse_field("42"), CellValue::Number(42.0));
        assert_eq!(parse_field(" 1.5 "), CellValue::Number(1.5));
        assert_eq!(parse_field("NaN"), CellValue::Text("NaN".to_string()));
        assert_eq!(parse_field("sim"), CellValue::Text("sim".to_string()));
        assert_eq!(
            parse_field("26/05/2021"),
            CellValue::Text("26/05/2021".to_string())
        );
    }

    #[test]
    fn test_ragged_records() {
        let data = "A,B,C\n1,x\n,,\n2,y,z\n";
        let sheet = Worksheet::from_csv("Data", data.as_bytes()).unwrap();

        assert_eq!(sheet.row_count(), 4);
        let first = sheet.row(1).unwrap();
        assert_eq!(first.cell(0).unwrap().cell_type(), CellType::Numeric);
        assert!(first.cell(2).is_none());
        assert!(sheet.row(2).unwrap().is_blank());
        assert_eq!(sheet.row(3).unwrap().cell_count(), 3);
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let data = "Name,Note\n\"Silva, Ana\",\"a \"\"quote\"\"\"\n";
        let workbook = Workbook::from_csv("People", data.as_bytes()).unwrap();
        let sheet = workbook.sheet_by_name("People").unwrap();
        let row = sheet.row(1).unwrap();
        assert_eq!(row.cell(0).unwrap().value.to_string(), "Silva, Ana");
        assert_eq!(row.cell(1).unwrap().value.to_string(), "a \"quote\"");
    }
}
