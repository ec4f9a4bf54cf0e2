use std::collections::HashSet;

use sheet_records::{CellValue, HeaderMapping, Record, SheetError};

/// Flatten records into CSV rows
///
/// Output columns: every label, in order of first appearance
pub fn to_rows(records: &[Record]) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    let mut columns: Vec<&str> = Vec::new();
    for label in records.iter().flat_map(|r| r.keys()) {
        if seen.insert(label.as_str()) {
            columns.push(label);
        }
    }

    let mut result = Vec::with_capacity(records.len() + 1);
    result.push(columns.iter().map(|c| c.to_string()).collect());

    for record in records {
        let row = columns
            .iter()
            .map(|col| record.get(*col).map(CellValue::to_string).unwrap_or_default())
            .collect();
        result.push(row);
    }

    result
}

/// Turn CSV rows into records keyed by the first row
///
/// If `columns` is empty, every CSV column is written under its own name.
pub fn from_rows(
    rows: Vec<Vec<String>>,
    columns: &[(String, String)],
) -> Result<(HeaderMapping, Vec<Record>), SheetError> {
    let mut rows = rows.into_iter();
    let header_row = rows
        .next()
        .ok_or_else(|| SheetError::InvalidArgument("CSV input has no header row".into()))?;

    let headers: HeaderMapping = if columns.is_empty() {
        header_row.iter().map(|key| (key.clone(), key.clone())).collect()
    } else {
        columns.iter().cloned().collect()
    };

    let records = rows
        .map(|row| {
            header_row
                .iter()
                .zip(row)
                .map(|(key, field)| (key.clone(), parse_field(&field)))
                .collect()
        })
        .collect();

    Ok((headers, records))
}

/// Parse a `key=label` column argument
pub fn parse_column(arg: &str) -> Result<(String, String), String> {
    let (key, label) = arg
        .split_once('=')
        .ok_or_else(|| format!("Expected key=label, got '{}'", arg))?;
    if key.is_empty() {
        return Err(format!("Empty column key in '{}'", arg));
    }
    Ok((key.to_string(), label.to_string()))
}

fn parse_field(field: &str) -> CellValue {
    match field {
        "" => CellValue::Empty,
        "true" => CellValue::Bool(true),
        "false" => CellValue::Bool(false),
        _ => field
            .parse::<f64>()
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::String(field.to_string())),
    }
}
