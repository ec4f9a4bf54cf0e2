pub mod records;

use std::path::Path;

use sheet_records::SheetError;

/// Parse a CSV file into Vec<Vec<String>>, header row included
pub fn read_csv(path: &Path) -> Result<Vec<Vec<String>>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(rows)
}

/// Dump flattened records (label row first) to `path`
pub fn write_csv(path: &Path, rows: Vec<Vec<String>>) -> Result<(), SheetError> {
    let mut writer = csv::Writer::from_path(path)?;

    for row in rows {
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
