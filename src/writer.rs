//! Write records to a new `.xlsx` workbook.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet};
use tracing::{debug, warn};

use crate::codec;
use crate::error::{Result, SheetError};
use crate::value::{CellValue, HeaderMapping, Record};

/// Sheet name used when the caller gives none
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Write records to `path` on a sheet named [`DEFAULT_SHEET_NAME`]
pub fn write_excel(
    path: impl AsRef<Path>,
    headers: &HeaderMapping,
    records: &[Record],
) -> Result<()> {
    write_excel_to_sheet(path, None, headers, records)
}

/// Write records to `path`, one row per record below a header row.
///
/// The output is always an `.xlsx` package, whatever the destination
/// extension. Columns follow `headers` order; each record is looked up by
/// header key and missing keys produce blank cells. An existing file at
/// `path` is overwritten.
pub fn write_excel_to_sheet(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    headers: &HeaderMapping,
    records: &[Record],
) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SheetError::invalid_argument("file path is empty"));
    }
    if headers.is_empty() {
        return Err(SheetError::invalid_argument("header mapping is empty"));
    }
    let sheet_name = sheet_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_SHEET_NAME);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;
    write_rows(worksheet, &default_format(), headers, records)?;
    let buffer = workbook.save_to_buffer()?;

    save(path, &buffer)?;
    debug!(
        path = %path.display(),
        sheet = sheet_name,
        rows = records.len(),
        "wrote workbook"
    );
    Ok(())
}

/// Left aligned, vertically centered, thin border on every side
fn default_format() -> Format {
    Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn write_rows(
    worksheet: &mut Worksheet,
    format: &Format,
    headers: &HeaderMapping,
    records: &[Record],
) -> Result<()> {
    for (col, label) in headers.labels().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, label, format)?;
    }

    for (i, record) in records.iter().enumerate() {
        // Row 0 holds the header
        let row = (i + 1) as RowNum;
        for (col, key) in headers.keys().enumerate() {
            let value = record.get(key).unwrap_or(&CellValue::Empty);
            codec::encode(worksheet, row, col as ColNum, value, format)?;
        }
    }
    Ok(())
}

fn save(path: &Path, buffer: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(buffer)?;
    writer.flush()?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    if let Err(e) = file.sync_all() {
        warn!(path = %path.display(), "failed to release output file: {}", e);
    }
    Ok(())
}
