//! Record capability and typed cell values.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// Locally unique row identifier.
pub type RecordId = u32;

/// One field of a record, as seen by search, sort, filter, and export.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Ordering used by field-based sorters.
    ///
    /// Values of the same kind compare naturally; `Empty` sorts first; mixed
    /// kinds fall back to their string forms.
    pub fn compare(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Empty, _) => Ordering::Less,
            (_, Empty) => Ordering::Greater,
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.total_cmp(b),
            (Integer(a), Decimal(b)) => (*a as f64).total_cmp(b),
            (Decimal(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (Bool(a), Bool(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// A row the tabular view can display.
///
/// Implementors expose a stable identifier and a string-convertible value per
/// field key. `FIELDS` lists every searchable field in display order; the
/// identifier itself is not a field.
pub trait Record: Clone {
    const FIELDS: &'static [&'static str];

    fn id(&self) -> RecordId;

    /// Overwritten by the store when a new record is inserted.
    fn set_id(&mut self, id: RecordId);

    /// Value for `key`; unknown keys yield `CellValue::Empty`.
    fn field(&self, key: &str) -> CellValue;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from("Acme").to_string(), "Acme");
        assert_eq!(CellValue::from(20_i64).to_string(), "20");
        assert_eq!(CellValue::from(12.5).to_string(), "12.5");
        assert_eq!(CellValue::from(true).to_string(), "true");

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::from(date).to_string(), "2024-03-09");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
        assert_eq!(CellValue::from(Some(3_i64)), CellValue::Integer(3));
    }

    #[test]
    fn test_compare_numbers_not_lexical() {
        let nine = CellValue::Integer(9);
        let ten = CellValue::Integer(10);
        assert_eq!(nine.compare(&ten), Ordering::Less);

        let a = CellValue::Decimal(2.5);
        assert_eq!(a.compare(&CellValue::Integer(3)), Ordering::Less);
    }

    #[test]
    fn test_compare_text_ignores_case() {
        let a = CellValue::from("apple");
        let b = CellValue::from("Banana");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(CellValue::Empty.compare(&CellValue::Integer(-5)), Ordering::Less);
        assert_eq!(CellValue::from("x").compare(&CellValue::Empty), Ordering::Greater);
    }
}
