//! Plain automation values
//!
//! [`Value`] covers the VARIANT kinds that carry data rather than an object
//! reference. Object references stay in the platform crate.

use std::fmt;

use crate::convert::from_ole_date;
use crate::error::{Error, Result};

/// A non-object automation value
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum Value {
    /// VT_EMPTY
    #[default]
    Empty,
    /// VT_NULL
    Null,
    /// VT_BOOL
    Bool(bool),
    /// VT_I1 / VT_I2 / VT_I4 / VT_UI1 / VT_UI2 / VT_INT
    Int(i32),
    /// VT_R4 / VT_R8 / VT_CY
    Double(f64),
    /// VT_BSTR
    Text(String),
    /// VT_DATE, as an OLE Automation Date
    Date(f64),
    /// VT_ERROR, the SCODE
    Error(i32),
}

impl Value {
    /// Name of the variant, used in type mismatch messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Error(_) => "error",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty | Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; doubles convert only when they hold an exact integer
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Double(n)
                if n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64 =>
            {
                Some(*n as i32)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Double(n) | Value::Date(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Typed extraction from a [`Value`], returning `None` on a kind mismatch
pub trait FromValue: Sized {
    /// Name used in diagnostics
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i32()
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "double";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for chrono::NaiveDateTime {
    const EXPECTED: &'static str = "date";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => from_ole_date(*d).ok(),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Double(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Fails for dates outside the OLE Automation range (years 100 to 9999)
impl TryFrom<chrono::NaiveDateTime> for Value {
    type Error = Error;

    fn try_from(d: chrono::NaiveDateTime) -> Result<Self> {
        crate::convert::to_ole_date(d).map(Value::Date)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "<empty>"),
            Value::Null => write!(f, "<null>"),
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Int(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => match from_ole_date(*d) {
                Ok(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
                Err(_) => write!(f, "<date {d}>"),
            },
            Value::Error(code) => write!(f, "#ERR(0x{:08X})", *code as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from("Sheet1"), Value::Text("Sheet1".into()));
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from(1.5f32), Value::Double(1.5));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_typed_extraction() {
        assert_eq!(i32::from_value(&Value::Int(7)), Some(7));
        assert_eq!(i32::from_value(&Value::Double(7.0)), Some(7));
        assert_eq!(i32::from_value(&Value::Double(7.5)), None);
        assert_eq!(i32::from_value(&Value::Double(1e12)), None);
        assert_eq!(f64::from_value(&Value::Int(2)), Some(2.0));
        assert_eq!(bool::from_value(&Value::Int(1)), None);
        assert_eq!(
            String::from_value(&Value::Text("$A$1".into())),
            Some("$A$1".to_string())
        );
        assert_eq!(String::from_value(&Value::Empty), None);
    }

    #[test]
    fn test_date_extraction() {
        let d = chrono::NaiveDateTime::from_value(&Value::Date(2.5)).unwrap();
        assert_eq!(d.to_string(), "1900-01-01 12:00:00");
        assert!(chrono::NaiveDateTime::from_value(&Value::Double(2.5)).is_none());
    }

    #[test]
    fn test_date_conversion_checks_range() {
        let noon = chrono::NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(Value::try_from(noon).unwrap(), Value::Date(2.5));

        let far_future = chrono::NaiveDate::from_ymd_opt(12000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            Value::try_from(far_future),
            Err(Error::DateOutOfRange(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Empty.to_string(), "<empty>");
        assert_eq!(Value::Bool(false).to_string(), "FALSE");
        assert_eq!(Value::Date(45000.5).to_string(), "2023-03-15 12:00:00");
        assert_eq!(
            Value::Error(0x800A07E7u32 as i32).to_string(),
            "#ERR(0x800A07E7)"
        );
    }

    #[test]
    fn test_empty() {
        assert!(Value::Empty.is_empty());
        assert!(Value::Null.is_empty());
        assert!(!Value::Text(String::new()).is_empty());
        assert_eq!(Value::Int(0).type_name(), "int");
    }
}
