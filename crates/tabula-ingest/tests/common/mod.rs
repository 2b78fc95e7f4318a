//! Shared fixture: a three-sheet workbook and the record types read from it.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tabula_model::{ColumnMapping, field};
use tabula_table::{CellValue, Row, Workbook, Worksheet};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Entry {
    pub coluna_a: String,
    pub coluna_b: String,
    pub coluna_c: String,
    pub coluna_d: Option<f64>,
    pub coluna_e: Option<NaiveDateTime>,
    pub coluna_f: Option<NaiveDateTime>,
    pub coluna_g: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Unmatched {
    pub coluna_a: String,
}

pub fn entry_mapping() -> ColumnMapping<Entry> {
    ColumnMapping::new()
        .required("Coluná A", field!(Entry, coluna_a))
        .and_then(|m| m.required("Coluna B", field!(Entry, coluna_b)))
        .and_then(|m| m.optional("Coluna C", field!(Entry, coluna_c)))
        .and_then(|m| m.required("Coluna D", field!(Entry, coluna_d)))
        .and_then(|m| m.required("Coluna E", field!(Entry, coluna_e)))
        .and_then(|m| m.required("Coluna F", field!(Entry, coluna_f)))
        .and_then(|m| m.required("Coluna G", field!(Entry, coluna_g)))
        .expect("fixture mapping has unique names")
}

pub fn unmatched_mapping() -> ColumnMapping<Unmatched> {
    ColumnMapping::new()
        .required("Coluna TESTE", field!(Unmatched, coluna_a))
        .expect("fixture mapping has unique names")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid fixture date")
}

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

fn number(value: f64) -> CellValue {
    CellValue::Number(value)
}

pub const HEADER: [&str; 8] = [
    "Coluná A", "Coluna B", "Discard", "Coluna D", "colunA C", "Coluna E", "Coluna F", "Coluna G",
];

/// Planilha1: header, four data rows at 1, 2, 3 and 5, row 4 blank.
pub fn main_sheet() -> Worksheet {
    let blank = CellValue::Blank;
    Worksheet::from_rows(
        "Planilha1",
        [
            Row::from_values(HEADER),
            Row::from_values([
                text("Linha A1"),
                text("Linha B1"),
                blank.clone(),
                number(1.0),
                blank.clone(),
                CellValue::Date(at(2022, 4, 28, 17, 30, 0)),
                text("27-04-2022 17:15"),
                text("sim"),
            ]),
            Row::from_values([
                number(123456.0),
                text("Linha B2"),
                number(2.0),
                blank.clone(),
                text("Linha C2"),
                CellValue::Date(at(2021, 5, 26, 0, 0, 0)),
                text("27-04-2022"),
                text("não "),
            ]),
            Row::from_values([
                text("Linha A3"),
                text("Linha B3"),
                text("x"),
                number(3.5),
                text("Linha C3"),
                text("2022-01-31"),
                text("not a date"),
                number(0.0),
            ]),
            Row::from_values([text(""), text(""), text("")]),
            Row::from_values([
                text("Linha A5"),
                text("Linha B5"),
                blank.clone(),
                number(5.0),
                text("Linha C5"),
                blank,
                text("31/12/2023 23:59:59"),
                text("talvez"),
            ]),
        ],
    )
}

/// Planilha3: same header, a single data row.
pub fn third_sheet() -> Worksheet {
    Worksheet::from_rows(
        "Planilha3",
        [
            Row::from_values(HEADER),
            Row::from_values([
                text("Só A"),
                text("Só B"),
                CellValue::Blank,
                number(9.0),
            ]),
        ],
    )
}

pub fn workbook() -> Workbook {
    let mut book = Workbook::with_sheet(main_sheet());
    book.add_sheet(Worksheet::new("Planilha2"))
        .expect("unique sheet name");
    book.add_sheet(third_sheet()).expect("unique sheet name");
    book
}

pub fn workbook_bytes() -> Vec<u8> {
    workbook().to_bytes().expect("fixture serializes")
}

pub fn expected_entries() -> [Entry; 4] {
    [
        Entry {
            coluna_a: "Linha A1".into(),
            coluna_b: "Linha B1".into(),
            coluna_c: String::new(),
            coluna_d: Some(1.0),
            coluna_e: Some(at(2022, 4, 28, 17, 30, 0)),
            coluna_f: Some(at(2022, 4, 27, 17, 15, 0)),
            coluna_g: Some(true),
        },
        Entry {
            coluna_a: "123456".into(),
            coluna_b: "Linha B2".into(),
            coluna_c: "Linha C2".into(),
            coluna_d: None,
            coluna_e: Some(at(2021, 5, 26, 0, 0, 0)),
            coluna_f: Some(at(2022, 4, 27, 0, 0, 0)),
            coluna_g: Some(false),
        },
        Entry {
            coluna_a: "Linha A3".into(),
            coluna_b: "Linha B3".into(),
            coluna_c: "Linha C3".into(),
            coluna_d: Some(3.5),
            coluna_e: Some(at(2022, 1, 31, 0, 0, 0)),
            coluna_f: None,
            coluna_g: Some(false),
        },
        Entry {
            coluna_a: "Linha A5".into(),
            coluna_b: "Linha B5".into(),
            coluna_c: "Linha C5".into(),
            coluna_d: Some(5.0),
            coluna_e: None,
            coluna_f: Some(at(2023, 12, 31, 23, 59, 59)),
            coluna_g: None,
        },
    ]
}

/// Routes reader events to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}
