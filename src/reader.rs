//! Read a sheet into header-keyed records.
//!
//! Row 0 of the sheet is always the header. Every later row becomes one
//! [`Record`] mapping header labels to decoded values; blank rows are skipped
//! without ending the scan.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, Xls, Xlsx};
use tracing::{debug, warn};

use crate::codec;
use crate::error::{Result, SheetError};
use crate::format::WorkbookFormat;
use crate::value::{CellValue, Record};

/// Which sheet of the workbook to read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelector {
    /// The first sheet
    #[default]
    First,
    /// Zero-based sheet position; out of range is an error
    Index(usize),
    /// Sheet name, matched case-insensitively; an unknown name yields no records
    Name(String),
}

/// Read the first sheet of an `.xlsx` or `.xls` file
pub fn read_excel(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    read_sheet(path, &SheetSelector::First)
}

/// Read the sheet at a zero-based position
pub fn read_excel_at(path: impl AsRef<Path>, index: usize) -> Result<Vec<Record>> {
    read_sheet(path, &SheetSelector::Index(index))
}

/// Read a sheet by name, returning no records if the workbook has no such sheet
pub fn read_excel_by_name(path: impl AsRef<Path>, sheet_name: &str) -> Result<Vec<Record>> {
    read_sheet(path, &SheetSelector::Name(sheet_name.to_string()))
}

/// Read the selected sheet into records.
///
/// Arguments and the file extension are validated before the file is opened.
pub fn read_sheet(path: impl AsRef<Path>, selector: &SheetSelector) -> Result<Vec<Record>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SheetError::invalid_argument("file path is empty"));
    }
    if matches!(selector, SheetSelector::Name(name) if name.is_empty()) {
        return Err(SheetError::invalid_argument("sheet name is empty"));
    }
    let format = WorkbookFormat::from_path(path)?;

    let file = File::open(path)?;
    let mut workbook = open_workbook(format, BufReader::new(file))?;
    debug!(path = %path.display(), %format, "opened workbook");

    let Some(sheet_name) = resolve_sheet(&workbook, selector)? else {
        debug!(?selector, "sheet not found, nothing to read");
        return Ok(Vec::new());
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let formulas = match workbook.worksheet_formula(&sheet_name) {
        Ok(formulas) => Some(formulas),
        Err(e) => {
            warn!(sheet = %sheet_name, "formula text unavailable: {}", e);
            None
        }
    };

    let records = records_from_range(&range, formulas.as_ref());
    debug!(sheet = %sheet_name, records = records.len(), "read sheet");
    Ok(records)
}

fn open_workbook<RS: Read + Seek>(format: WorkbookFormat, reader: RS) -> Result<Sheets<RS>> {
    let workbook = match format {
        WorkbookFormat::Xlsx => {
            Sheets::Xlsx(Xlsx::new(reader).map_err(calamine::Error::from)?)
        }
        WorkbookFormat::Xls => Sheets::Xls(Xls::new(reader).map_err(calamine::Error::from)?),
    };
    Ok(workbook)
}

/// Resolve the selector to a sheet name; `None` is the soft miss for names
fn resolve_sheet<RS: Read + Seek>(
    workbook: &Sheets<RS>,
    selector: &SheetSelector,
) -> Result<Option<String>> {
    let names = workbook.sheet_names();
    match selector {
        SheetSelector::First => names
            .first()
            .cloned()
            .map(Some)
            .ok_or(SheetError::SheetIndexOutOfRange { index: 0, count: 0 }),
        SheetSelector::Index(index) => names
            .get(*index)
            .cloned()
            .map(Some)
            .ok_or(SheetError::SheetIndexOutOfRange {
                index: *index,
                count: names.len(),
            }),
        SheetSelector::Name(name) => {
            let wanted = name.to_lowercase();
            Ok(names.into_iter().find(|n| n.to_lowercase() == wanted))
        }
    }
}

/// Convert a sheet's cells into records, using absolute sheet coordinates
pub(crate) fn records_from_range(
    range: &Range<Data>,
    formulas: Option<&Range<String>>,
) -> Vec<Record> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };

    let header: Vec<Option<String>> = (0..=last_col)
        .map(|col| {
            let label = cell_at(range, formulas, 0, col).to_string();
            (!label.is_empty()).then_some(label)
        })
        .collect();
    if header.iter().all(Option::is_none) {
        return Vec::new();
    }

    let mut records = Vec::new();
    for row in 1..=last_row {
        let cells: Vec<CellValue> = (0..=last_col)
            .map(|col| cell_at(range, formulas, row, col))
            .collect();

        // Blank row
        let Some(last_cell) = cells.iter().rposition(|c| !c.is_empty()) else {
            continue;
        };

        let mut record = Record::new();
        for (label, value) in header.iter().zip(cells).take(last_cell + 1) {
            if let Some(label) = label {
                record.insert(label.clone(), value);
            }
        }
        records.push(record);
    }

    records
}

fn cell_at(range: &Range<Data>, formulas: Option<&Range<String>>, row: u32, col: u32) -> CellValue {
    let formula = formulas
        .and_then(|f| f.get_value((row, col)))
        .map(String::as_str);
    match range.get_value((row, col)) {
        Some(data) => codec::decode(data, formula),
        None => codec::decode(&Data::Empty, formula),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(rows: &[&[Data]]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_blank_row_is_skipped() {
        let range = range_from(&[
            &[s("name"), s("qty")],
            &[s("apple"), Data::Float(3.0)],
            &[Data::Empty, Data::Empty],
            &[s("pear"), Data::Float(5.0)],
        ]);

        let records = records_from_range(&range, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], CellValue::String("apple".into()));
        assert_eq!(records[1]["name"], CellValue::String("pear".into()));
        assert_eq!(records[1]["qty"], CellValue::Number(5.0));
    }

    #[test]
    fn test_header_gap_drops_column() {
        let range = range_from(&[
            &[s("a"), s("b"), Data::Empty, s("d")],
            &[Data::Float(1.0), Data::Float(2.0), Data::Float(3.0), Data::Float(4.0)],
        ]);

        let records = records_from_range(&range, None);

        assert_eq!(records.len(), 1);
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "d"]);
        assert_eq!(records[0]["d"], CellValue::Number(4.0));
    }

    #[test]
    fn test_empty_header_row_yields_nothing() {
        let range = range_from(&[
            &[Data::Empty, Data::Empty],
            &[s("x"), s("y")],
            &[s("z"), s("w")],
        ]);

        assert!(records_from_range(&range, None).is_empty());
    }

    #[test]
    fn test_trailing_empty_cells_are_not_visited() {
        let range = range_from(&[
            &[s("a"), s("b"), s("c")],
            &[s("1"), Data::Empty, s("3")],
            &[s("4"), Data::Empty, Data::Empty],
        ]);

        let records = records_from_range(&range, None);

        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0]["b"], CellValue::Empty);
        assert_eq!(records[1].len(), 1);
        assert_eq!(records[1]["a"], CellValue::String("4".into()));
    }

    #[test]
    fn test_formula_overlay() {
        let range = range_from(&[&[s("total")], &[Data::Float(6.0)]]);
        let mut formulas = Range::new((0, 0), (1, 0));
        formulas.set_value((1, 0), "SUM(B1:B3)".to_string());

        let records = records_from_range(&range, Some(&formulas));

        assert_eq!(records[0]["total"], CellValue::Formula("=SUM(B1:B3)".into()));
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(records_from_range(&range, None).is_empty());
    }

    #[test]
    fn test_validation_happens_before_io() {
        let err = read_sheet("", &SheetSelector::First).unwrap_err();
        assert!(matches!(err, SheetError::InvalidArgument(_)));

        let err = read_excel_by_name("missing.xlsx", "").unwrap_err();
        assert!(matches!(err, SheetError::InvalidArgument(_)));

        let err = read_excel("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_excel("does/not/exist.xlsx").unwrap_err();
        match err {
            SheetError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
