//! Error types for reading and writing sheets.

use thiserror::Error;

/// Result type for sheet operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors that can occur while reading or writing a workbook
#[derive(Debug, Error)]
pub enum SheetError {
    /// Caller supplied an empty path, header mapping or sheet name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File extension is neither `.xlsx` nor `.xls`
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Explicit sheet index past the last sheet
    #[error("Sheet index {index} out of range (workbook has {count} sheets)")]
    SheetIndexOutOfRange { index: usize, count: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input workbook could not be parsed
    #[error("Excel error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Output workbook could not be built or serialized
    #[error("Excel write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SheetError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        SheetError::InvalidArgument(msg.into())
    }
}
