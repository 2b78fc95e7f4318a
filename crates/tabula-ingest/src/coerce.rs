//! Lenient conversion of cell values into field values.
//!
//! Coercion never fails loudly: a value that does not fit the target kind
//! yields `None` and the field keeps its default.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use tabula_model::{FieldKind, FieldValue};
use tabula_table::CellValue;

static TRUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(true|yes|y|sim|s|1)$").expect("Invalid true-value regex")
});

static FALSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(false|no|n|nao|não|0)$").expect("Invalid false-value regex")
});

/// Text date formats with a time part, tried in order.
pub const DATE_TIME_FORMATS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Date-only formats, tried after [`DATE_TIME_FORMATS`]. They parse to
/// midnight.
pub const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d"];

/// A text date format with the exact shape its input must have. Every field
/// is fixed-width: two digits, four for the year.
struct TextDateFormat {
    shape: Regex,
    format: &'static str,
    has_time: bool,
}

static TEXT_DATE_FORMATS: LazyLock<Vec<TextDateFormat>> = LazyLock::new(|| {
    DATE_TIME_FORMATS
        .iter()
        .chain(DATE_FORMATS)
        .map(|format| TextDateFormat {
            shape: Regex::new(&shape_pattern(format)).expect("Invalid date shape regex"),
            format: *format,
            has_time: format.contains("%H"),
        })
        .collect()
});

fn shape_pattern(format: &str) -> String {
    let mut pattern = String::from("^");
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.next() {
                Some('Y') => pattern.push_str("[0-9]{4}"),
                Some(_) => pattern.push_str("[0-9]{2}"),
                None => {}
            }
        } else {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    pattern.push('$');
    pattern
}

/// Converts a raw cell value for a field of the given kind.
///
/// Null values (blank cells, empty text) and kinds without a strategy give
/// `None`.
pub fn coerce(kind: FieldKind, raw: &CellValue) -> Option<FieldValue> {
    if raw.is_null() {
        return None;
    }
    match kind {
        FieldKind::Boolean => coerce_boolean(raw),
        FieldKind::DateTime => coerce_date_time(raw),
        FieldKind::Integer | FieldKind::Float => coerce_number(raw),
        FieldKind::Text => coerce_text(raw),
        FieldKind::Other => None,
    }
}

/// Booleans from trimmed text matching the true/false word lists, or from
/// the numbers 0 and 1.
pub fn coerce_boolean(raw: &CellValue) -> Option<FieldValue> {
    match raw {
        CellValue::Text(text) => parse_boolean(text).map(FieldValue::Boolean),
        CellValue::Number(n) if *n == 1.0 => Some(FieldValue::Boolean(true)),
        CellValue::Number(n) if *n == 0.0 => Some(FieldValue::Boolean(false)),
        _ => None,
    }
}

fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if TRUE_PATTERN.is_match(text) {
        Some(true)
    } else if FALSE_PATTERN.is_match(text) {
        Some(false)
    } else {
        None
    }
}

/// Dates pass through; text is parsed with the first matching format.
pub fn coerce_date_time(raw: &CellValue) -> Option<FieldValue> {
    match raw {
        CellValue::Date(dt) => Some(FieldValue::DateTime(*dt)),
        CellValue::Text(text) => parse_date_time(text).map(FieldValue::DateTime),
        _ => None,
    }
}

/// Parses text against [`DATE_TIME_FORMATS`] then [`DATE_FORMATS`].
///
/// The text must match a format exactly, so single-digit fields and
/// surrounding whitespace are rejected.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    TEXT_DATE_FORMATS
        .iter()
        .filter(|candidate| candidate.shape.is_match(text))
        .find_map(|candidate| {
            if candidate.has_time {
                NaiveDateTime::parse_from_str(text, candidate.format).ok()
            } else {
                NaiveDate::parse_from_str(text, candidate.format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            }
        })
}

/// Only native numbers; numeric-looking text is not converted.
pub fn coerce_number(raw: &CellValue) -> Option<FieldValue> {
    match raw {
        CellValue::Number(n) => Some(FieldValue::Number(*n)),
        _ => None,
    }
}

/// Text verbatim; numbers and dates in their display form.
pub fn coerce_text(raw: &CellValue) -> Option<FieldValue> {
    match raw {
        CellValue::Text(text) => Some(FieldValue::Text(text.clone())),
        CellValue::Number(_) | CellValue::Date(_) => Some(FieldValue::Text(raw.to_string())),
        CellValue::Blank => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_boolean_words() {
        for word in ["true", "YES", "y", "Sim", "s", "1", " sim "] {
            assert_eq!(
                coerce(FieldKind::Boolean, &text(word)),
                Some(FieldValue::Boolean(true)),
                "{word}"
            );
        }
        for word in ["false", "No", "n", "nao", "não", "NÃO", "0", "não "] {
            assert_eq!(
                coerce(FieldKind::Boolean, &text(word)),
                Some(FieldValue::Boolean(false)),
                "{word}"
            );
        }
        assert_eq!(coerce(FieldKind::Boolean, &text("talvez")), None);
        assert_eq!(coerce(FieldKind::Boolean, &text("yes please")), None);
    }

    #[test]
    fn test_boolean_numbers() {
        assert_eq!(
            coerce(FieldKind::Boolean, &CellValue::Number(1.0)),
            Some(FieldValue::Boolean(true))
        );
        assert_eq!(
            coerce(FieldKind::Boolean, &CellValue::Number(0.0)),
            Some(FieldValue::Boolean(false))
        );
        assert_eq!(coerce(FieldKind::Boolean, &CellValue::Number(2.0)), None);
        assert_eq!(
            coerce(FieldKind::Boolean, &CellValue::Date(at(2022, 1, 1, 0, 0, 0))),
            None
        );
    }

    #[test]
    fn test_date_formats() {
        let cases = [
            ("27-04-2022 17:15:30", at(2022, 4, 27, 17, 15, 30)),
            ("27/04/2022 17:15:30", at(2022, 4, 27, 17, 15, 30)),
            ("2022-04-27 17:15:30", at(2022, 4, 27, 17, 15, 30)),
            ("2022/04/27 17:15:30", at(2022, 4, 27, 17, 15, 30)),
            ("27-04-2022 17:15", at(2022, 4, 27, 17, 15, 0)),
            ("2022/04/27 17:15", at(2022, 4, 27, 17, 15, 0)),
            ("27-04-2022", at(2022, 4, 27, 0, 0, 0)),
            ("2024-01-05", at(2024, 1, 5, 0, 0, 0)),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_date_time(input), Some(expected), "{input}");
        }
    }

    #[test]
    fn test_day_first_format() {
        assert_eq!(parse_date_time("05-01-2024"), Some(at(2024, 1, 5, 0, 0, 0)));
    }

    #[test]
    fn test_slash_dates_need_a_time() {
        assert_eq!(parse_date_time("27/04/2022"), None);
        assert_eq!(parse_date_time("2022/04/27"), None);
        assert_eq!(
            parse_date_time("27/04/2022 08:00"),
            Some(at(2022, 4, 27, 8, 0, 0))
        );
    }

    #[test]
    fn test_fields_are_fixed_width() {
        assert_eq!(parse_date_time("5-1-2024"), None);
        assert_eq!(parse_date_time("5-1-2024 7:05"), None);
        assert_eq!(parse_date_time("05-01-2024 7:05"), None);
        assert_eq!(parse_date_time("05-01-24"), None);
        assert_eq!(parse_date_time(" 27-04-2022"), None);
        assert_eq!(parse_date_time("27-04-2022 "), None);
        assert_eq!(parse_date_time("05-01-2024 07:05"), Some(at(2024, 1, 5, 7, 5, 0)));
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(parse_date_time("2022-13-01"), None);
        assert_eq!(parse_date_time("27.04.2022"), None);
        assert_eq!(coerce(FieldKind::DateTime, &CellValue::Number(44000.0)), None);
    }

    #[test]
    fn test_native_dates_pass_through() {
        let dt = at(2022, 4, 28, 17, 30, 0);
        assert_eq!(
            coerce(FieldKind::DateTime, &CellValue::Date(dt)),
            Some(FieldValue::DateTime(dt))
        );
    }

    #[test]
    fn test_numbers_only_from_numeric_cells() {
        assert_eq!(
            coerce(FieldKind::Float, &CellValue::Number(2.5)),
            Some(FieldValue::Number(2.5))
        );
        assert_eq!(
            coerce(FieldKind::Integer, &CellValue::Number(3.0)),
            Some(FieldValue::Number(3.0))
        );
        assert_eq!(coerce(FieldKind::Integer, &text("3")), None);
    }

    #[test]
    fn test_text_conversions() {
        assert_eq!(
            coerce(FieldKind::Text, &text(" keep ")),
            Some(FieldValue::Text(" keep ".to_string()))
        );
        assert_eq!(
            coerce(FieldKind::Text, &CellValue::Number(123456.0)),
            Some(FieldValue::Text("123456".to_string()))
        );
        assert_eq!(
            coerce(FieldKind::Text, &CellValue::Date(at(2024, 1, 5, 0, 0, 0))),
            Some(FieldValue::Text("2024-01-05 00:00:00".to_string()))
        );
    }

    #[test]
    fn test_null_and_other_are_skipped() {
        assert_eq!(coerce(FieldKind::Text, &CellValue::Blank), None);
        assert_eq!(coerce(FieldKind::Text, &text("")), None);
        assert_eq!(coerce(FieldKind::Other, &text("x")), None);
    }
}
