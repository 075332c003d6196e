//! Case-insensitive substring filtering.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// A substring filter on one field.
///
/// An empty `key` or an empty `value` means no filter is active.
///
/// # Example
///
/// ```
/// use engage_lib::model::Value;
/// use engage_lib::table::FilterState;
///
/// let filter = FilterState::new("name", "PARK");
/// assert!(filter.matches(Some(&Value::from("Riverside Park"))));
/// assert!(!filter.matches(None));
/// assert!(FilterState::default().matches(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Field to match against.
    #[serde(default)]
    pub key: String,
    /// Text to look for.
    #[serde(default)]
    pub value: String,
}

impl FilterState {
    /// Creates a filter on `key` for `value`.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this filter narrows anything.
    pub fn is_active(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }

    /// Tests one field value against the filter.
    ///
    /// Both sides are lowercased and the field must contain the filter text
    /// somewhere. A missing or null field never matches an active filter.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        if !self.is_active() {
            return true;
        }
        match field {
            None | Some(Value::Null) => false,
            Some(value) => value
                .to_string()
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
        }
    }
}

/// Keeps the rows whose `key_of` value matches `filter`, in input order.
///
/// An inactive filter returns every row.
pub fn filter_rows<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    filter: &FilterState,
    key_of: F,
) -> Vec<&'a T>
where
    T: 'a,
    F: Fn(&T) -> Option<Value>,
{
    if !filter.is_active() {
        return rows.into_iter().collect();
    }
    rows.into_iter()
        .filter(|row| filter.matches(key_of(*row).as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(row: &(&str, Option<&str>)) -> Option<Value> {
        row.1.map(Value::from)
    }

    #[test]
    fn test_inactive_filter_keeps_everything() {
        let rows = vec![("a", None), ("b", Some("x"))];
        assert_eq!(filter_rows(&rows, &FilterState::default(), name_of).len(), 2);
        assert_eq!(filter_rows(&rows, &FilterState::new("name", ""), name_of).len(), 2);
        assert_eq!(filter_rows(&rows, &FilterState::new("", "x"), name_of).len(), 2);
    }

    #[test]
    fn test_matches_anywhere_ignoring_case() {
        let rows = vec![
            ("1", Some("Bravo")),
            ("2", Some("alpha")),
            ("3", Some("Delta")),
            ("4", Some("Echo")),
        ];
        let kept = filter_rows(&rows, &FilterState::new("name", "A"), name_of);
        let ids: Vec<_> = kept.iter().map(|r| r.0).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_rows_without_field_are_excluded() {
        let rows = vec![("1", None), ("2", Some("park")), ("3", None)];
        let kept = filter_rows(&rows, &FilterState::new("name", "p"), name_of);
        assert_eq!(kept, vec![&("2", Some("park"))]);
    }

    #[test]
    fn test_numbers_match_on_their_text() {
        let filter = FilterState::new("count", "12");
        assert!(filter.matches(Some(&Value::from(4123i64))));
        assert!(!filter.matches(Some(&Value::from(21i64))));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = vec![("1", Some("Oak")), ("2", Some("Pine")), ("3", Some("oakwood"))];
        let filter = FilterState::new("name", "oak");
        let once = filter_rows(&rows, &filter, name_of);
        let twice = filter_rows(once.iter().copied(), &filter, name_of);
        assert_eq!(once, twice);
    }
}
