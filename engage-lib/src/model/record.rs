//! Dynamic row record

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;
use crate::table::Row;

/// A dynamic row with named fields.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing any
/// tabular dataset (for example a JSON export) to be fed to a
/// [`Table`](crate::table::Table) without declaring a struct for it.
///
/// # Example
///
/// ```
/// use engage_lib::model::Record;
///
/// let record = Record::new()
///     .set("name", "Harbour front consultation")
///     .set("surveys", 2i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Harbour front consultation"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets an integer field value.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a date field value.
    ///
    /// Strings in `YYYY-MM-DD` form are accepted too, since JSON has no date
    /// type and records loaded from files carry dates as text.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| FieldError::type_mismatch(field, "date", "string")),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }
}

impl Row for Record {
    fn field(&self, key: &str) -> Option<Value> {
        self.fields.get(key).cloned()
    }
}
