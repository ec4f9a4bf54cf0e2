use std::fmt;
use std::path::Path;

use crate::error::{Result, SheetError};

/// Binary workbook format, picked from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML package
    Xlsx,
    /// Legacy BIFF workbook
    Xls,
}

impl WorkbookFormat {
    /// Detect the format from the path suffix. Matching is case-sensitive.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".xlsx") {
            Ok(WorkbookFormat::Xlsx)
        } else if name.ends_with(".xls") {
            Ok(WorkbookFormat::Xls)
        } else {
            Err(SheetError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

impl fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbookFormat::Xlsx => f.write_str("xlsx"),
            WorkbookFormat::Xls => f.write_str("xls"),
        }
    }
}
