//! Generic cell values, records and header mappings.

use std::fmt;

use chrono::NaiveDateTime;
use indexmap::IndexMap;

/// Pattern used whenever a timestamp is rendered as text
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text produced for cells the codec has no mapping for
pub const UNRECOGNIZED: &str = "[unrecognized]";

/// One row of a sheet, keyed by header label
pub type Record = IndexMap<String, CellValue>;

/// Decoded value of a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    String(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(CellError),
    /// Formula text, always starting with `=`
    Formula(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) | CellValue::Formula(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) | CellValue::Formula(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(DATE_FORMAT)),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

macro_rules! widen_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(n: $t) -> Self {
                    CellValue::Number(n as f64)
                }
            }
        )*
    };
}

widen_integer!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<CellError> for CellValue {
    fn from(e: CellError) -> Self {
        CellValue::Error(e)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Error code stored in a failed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    Div0,
    NotAvailable,
    Name,
    Null,
    Num,
    Ref,
    Value,
    GettingData,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal = match self {
            CellError::Div0 => "#DIV/0!",
            CellError::NotAvailable => "#N/A",
            CellError::Name => "#NAME?",
            CellError::Null => "#NULL!",
            CellError::Num => "#NUM!",
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::GettingData => "#DATA!",
        };
        f.write_str(literal)
    }
}

impl From<&calamine::CellErrorType> for CellError {
    fn from(err: &calamine::CellErrorType) -> Self {
        use calamine::CellErrorType;

        match err {
            CellErrorType::Div0 => CellError::Div0,
            CellErrorType::NA => CellError::NotAvailable,
            CellErrorType::Name => CellError::Name,
            CellErrorType::Null => CellError::Null,
            CellErrorType::Num => CellError::Num,
            CellErrorType::Ref => CellError::Ref,
            CellErrorType::Value => CellError::Value,
            CellErrorType::GettingData => CellError::GettingData,
        }
    }
}

/// Ordered mapping from record key to column label.
///
/// Iteration order is column order on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    columns: IndexMap<String, String>,
}

impl HeaderMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, keeping its original position if the key already exists
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.columns.insert(key.into(), label.into());
    }

    /// Builder form of [`HeaderMapping::insert`]
    #[must_use]
    pub fn column(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(key, label);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = HeaderMapping::new();
        for (key, label) in iter {
            mapping.insert(key, label);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_integers_widen_to_f64() {
        assert_eq!(CellValue::from(42_i32), CellValue::Number(42.0));
        assert_eq!(CellValue::from(7_u64), CellValue::Number(7.0));
        assert_eq!(CellValue::from(1.5_f32), CellValue::Number(1.5));
    }

    #[test]
    fn test_option_maps_none_to_empty() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Empty);
        assert_eq!(CellValue::from(Some("x")), CellValue::String("x".into()));
    }

    #[test]
    fn test_display() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_string(), "2024-03-09 07:05:00");
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.25).to_string(), "2.25");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(CellValue::Error(CellError::Div0).to_string(), "#DIV/0!");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_header_mapping_keeps_insertion_order() {
        let mapping = HeaderMapping::new()
            .column("b", "Beta")
            .column("a", "Alpha")
            .column("c", "Gamma");

        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(
            mapping.labels().collect::<Vec<_>>(),
            vec!["Beta", "Alpha", "Gamma"]
        );
    }

    #[test]
    fn test_header_mapping_reinsert_keeps_position() {
        let mut mapping: HeaderMapping = [("a", "A"), ("b", "B")].into_iter().collect();
        mapping.insert("a", "First");

        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.iter().collect::<Vec<_>>(),
            vec![("a", "First"), ("b", "B")]
        );
    }
}
