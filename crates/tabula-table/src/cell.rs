//! Cells, cell values and cell styles.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format for date cells.
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stored value of a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Blank,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

/// Type tag of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Blank,
    String,
    Numeric,
    Date,
}

impl CellValue {
    pub fn cell_type(&self) -> CellType {
        match self {
            Self::Blank => CellType::Blank,
            Self::Text(_) => CellType::String,
            Self::Number(_) => CellType::Numeric,
            Self::Date(_) => CellType::Date,
        }
    }

    /// True for blank cells and empty text.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Blank => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(dt) => write!(f, "{}", dt.format(DATE_DISPLAY_FORMAT)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    General,
    Left,
    Center,
    Right,
}

/// Presentation attributes of a cell.
///
/// Styles are plain values: cloning a cell clones its style, and changing a
/// clone's style never reaches the source cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellStyle {
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub locked: bool,
    pub bold: bool,
    /// Number format code (e.g. `dd/mm/yyyy`), if any.
    pub number_format: Option<String>,
}

/// A cell: value plus style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    #[serde(default)]
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            style: CellStyle::default(),
        }
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// Decoded value: `None` for blank cells and empty text.
    pub fn decoded(&self) -> Option<&CellValue> {
        if self.value.is_null() {
            None
        } else {
            Some(&self.value)
        }
    }

    pub fn set_value(&mut self, value: impl Into<CellValue>) {
        self.value = value.into();
    }

    /// Copies value and style from another cell.
    pub fn clone_from_cell(&mut self, source: &Cell) {
        self.value = source.value.clone();
        self.style = source.style.clone();
    }
}
