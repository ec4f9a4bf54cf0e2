//! # sheet-records
//!
//! Read spreadsheet rows as records keyed by the header row, and write
//! records back out under an ordered header mapping.
//!
//! - **Reading** supports `.xlsx` and legacy `.xls` workbooks via `calamine`.
//! - **Writing** always produces an `.xlsx` package via `rust_xlsxwriter`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheet_records::{read_excel, write_excel, CellValue, HeaderMapping, Record};
//!
//! let headers = HeaderMapping::new()
//!     .column("name", "Name")
//!     .column("qty", "Quantity");
//!
//! let mut record = Record::new();
//! record.insert("name".into(), "bolt".into());
//! record.insert("qty".into(), 12.into());
//!
//! write_excel("stock.xlsx", &headers, &[record])?;
//!
//! // Read back, keyed by column label
//! let records = read_excel("stock.xlsx")?;
//! assert_eq!(records[0]["Quantity"], CellValue::Number(12.0));
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod reader;
pub mod value;
pub mod writer;

// Re-exports
pub use error::{Result, SheetError};
pub use format::WorkbookFormat;
pub use reader::{read_excel, read_excel_at, read_excel_by_name, read_sheet, SheetSelector};
pub use value::{CellError, CellValue, HeaderMapping, Record, DATE_FORMAT, UNRECOGNIZED};
pub use writer::{write_excel, write_excel_to_sheet, DEFAULT_SHEET_NAME};
