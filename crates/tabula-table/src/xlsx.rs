//! Spreadsheet (`.xlsx`) import.
//!
//! Every worksheet of the file becomes a sheet of the same name, in workbook
//! order. Cells are decoded the way the reader expects raw values:
//!
//! - text is kept, empty text creates no cell
//! - integers and floats become numeric cells
//! - date-formatted numbers become date cells
//! - booleans, error values and empty cells create no cell
//!
//! Formula cells carry their cached result. Styles are not imported.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Worksheet;
use crate::workbook::Workbook;

/// Leading bytes of a zip archive, which every `.xlsx` file is.
pub const XLSX_SIGNATURE: [u8; 4] = [b'P', b'K', 0x03, 0x04];

fn convert_value(value: &Data) -> Option<CellValue> {
    match value {
        Data::String(text) if text.is_empty() => None,
        Data::String(text) => Some(CellValue::Text(text.clone())),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map_or(CellValue::Number(dt.as_f64()), CellValue::Date),
        ),
        Data::DateTimeIso(text) => Some(parse_iso(text)),
        Data::DurationIso(text) => Some(CellValue::Text(text.clone())),
        Data::Bool(_) | Data::Error(_) | Data::Empty => None,
    }
}

fn parse_iso(text: &str) -> CellValue {
    text.parse::<NaiveDateTime>()
        .or_else(|_| {
            text.parse::<NaiveDate>()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_or_else(|_| CellValue::Text(text.to_string()), CellValue::Date)
}

impl Workbook {
    /// Reads every worksheet of an `.xlsx` file.
    pub fn from_xlsx(bytes: &[u8]) -> Result<Self> {
        let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        let mut workbook = Self::new();
        for name in xlsx.sheet_names() {
            let range = xlsx.worksheet_range(&name)?;
            let mut sheet = Worksheet::new(name);

            // Range coordinates are relative to its first used cell.
            if let Some((first_row, first_column)) = range.start() {
                for (row, column, value) in range.used_cells() {
                    if let Some(value) = convert_value(value) {
                        sheet.set_cell_value(
                            first_row as usize + row,
                            first_column as usize + column,
                            value,
                        );
                    }
                }
            }

            tracing::debug!(
                sheet = sheet.name(),
                rows = sheet.row_count(),
                "imported xlsx sheet"
            );
            workbook.add_sheet(sheet)?;
        }
        Ok(workbook)
    }

    /// True when `bytes` start like an `.xlsx` file rather than a workbook
    /// container.
    pub fn is_xlsx(bytes: &[u8]) -> bool {
        bytes.starts_with(&XLSX_SIGNATURE)
    }
}
