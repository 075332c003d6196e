//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value read from one field of a row.
///
/// Rows expose their fields as `Value`s so that the table engine can sort,
/// filter and render any row type without knowing its concrete layout.
///
/// # Type Mapping
///
/// | Field kind | Rust Variant |
/// |------------|--------------|
/// | absent/null | `Null` |
/// | checkbox, flag | `Bool` |
/// | counter, id | `Int` |
/// | measurement | `Float` |
/// | text | `String` |
/// | calendar day | `Date` |
/// | timestamp | `DateTime` |
/// | identifier | `Guid` |
///
/// # Example
///
/// ```
/// use engage_lib::model::Value;
///
/// let name = Value::from("Riverside park upgrade");
/// let surveys = Value::from(3i64);
/// let published = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Calendar date without time zone.
    #[serde(skip_deserializing)]
    Date(NaiveDate),
    /// Date and time with timezone.
    #[serde(skip_deserializing)]
    DateTime(DateTime<Utc>),
    /// GUID/UUID value.
    #[serde(skip_deserializing)]
    Guid(Uuid),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Guid(_) => "guid",
        }
    }

    /// Rank used to order values of different kinds against each other.
    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::Date(_) => 4,
            Value::DateTime(_) => 5,
            Value::Guid(_) => 6,
        }
    }

    /// Compares two values with plain relational semantics.
    ///
    /// Numbers compare numerically (an `Int` and a `Float` meet as `f64`),
    /// strings compare by code point and are therefore case-sensitive
    /// (`"Bravo" < "alpha"`), dates and timestamps compare chronologically.
    /// Values of different kinds are ordered by kind so the result is a
    /// total order; callers decide where `Null` goes.
    ///
    /// # Example
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use engage_lib::model::Value;
    ///
    /// assert_eq!(Value::from(2i64).compare(&Value::from(10i64)), Ordering::Less);
    /// assert_eq!(Value::from("Bravo").compare(&Value::from("alpha")), Ordering::Less);
    /// ```
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Guid(a), Value::Guid(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Value::Guid(g) => write!(f, "{}", g),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(Value::from(9i64).compare(&Value::from(10i64)), Ordering::Less);
        assert_eq!(Value::from(2.5).compare(&Value::from(2i64)), Ordering::Greater);
        assert_eq!(Value::from(3i64).compare(&Value::from(3.0)), Ordering::Equal);
    }

    #[test]
    fn test_strings_compare_case_sensitively() {
        assert_eq!(
            Value::from("Charlie").compare(&Value::from("alpha")),
            Ordering::Less
        );
        assert_eq!(
            Value::from("alpha").compare(&Value::from("bravo")),
            Ordering::Less
        );
    }

    #[test]
    fn test_mixed_kinds_are_ordered_by_kind() {
        assert_eq!(Value::from(true).compare(&Value::from(0i64)), Ordering::Less);
        assert_eq!(Value::from(100i64).compare(&Value::from("1")), Ordering::Less);
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();
        assert_eq!(Value::from(date).to_string(), "2017-03-01");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from("Open").to_string(), "Open");
    }

    #[test]
    fn test_deserialize_untagged_json() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 7, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(7),
                Value::Float(1.5),
                Value::String("x".to_string()),
            ]
        );
    }
}
