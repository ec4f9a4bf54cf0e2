//! Conversion between spreadsheet cells and [`CellValue`].
//!
//! Decoding and encoding are deliberately asymmetric for timestamps: a
//! date-formatted cell decodes to [`CellValue::DateTime`], while a timestamp
//! is written back as text in [`DATE_FORMAT`].

use calamine::{Data, ExcelDateTime};
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{ColNum, Format, RowNum, Worksheet, XlsxError};

use crate::value::{CellValue, DATE_FORMAT, UNRECOGNIZED};

/// Decode a cell, letting formula text take precedence over the cached value
pub fn decode(data: &Data, formula: Option<&str>) -> CellValue {
    if let Some(text) = formula.filter(|f| !f.is_empty()) {
        return CellValue::Formula(format!("={}", text));
    }

    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => decode_excel_datetime(dt),
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::String(UNRECOGNIZED.to_string()),
        },
        Data::DurationIso(_) => CellValue::String(UNRECOGNIZED.to_string()),
        Data::Error(e) => CellValue::Error(e.into()),
    }
}

/// Date-formatted serials outside the representable range stay numeric
fn decode_excel_datetime(dt: &ExcelDateTime) -> CellValue {
    match dt.as_datetime() {
        Some(naive) => CellValue::DateTime(naive),
        None => CellValue::Number(dt.as_f64()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Write `value` into one cell with `format` applied
pub fn encode(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Empty => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        CellValue::DateTime(dt) => {
            let text = dt.format(DATE_FORMAT).to_string();
            worksheet.write_string_with_format(row, col, &text, format)?;
        }
        CellValue::String(_) | CellValue::Error(_) | CellValue::Formula(_) => {
            worksheet.write_string_with_format(row, col, value.to_string(), format)?;
        }
    }
    Ok(())
}
