//! Single-column stable sorting.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Returns `"asc"` or `"desc"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// The active sort: exactly one key and its direction.
///
/// # Example
///
/// ```
/// use engage_lib::table::{Direction, SortState};
///
/// let mut sort = SortState::asc("name");
/// sort.toggle("name");
/// assert_eq!(sort.direction, Direction::Desc);
///
/// sort.toggle("created_date");
/// assert_eq!(sort, SortState::asc("created_date"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Field the rows are ordered by.
    pub key: String,
    /// Ordering direction.
    #[serde(default)]
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a field.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Applies a column-header click.
    ///
    /// Clicking the active ascending column flips it to descending; any other
    /// click selects the clicked column ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key == key && self.direction == Direction::Asc {
            self.direction = Direction::Desc;
        } else {
            self.key = key.to_string();
            self.direction = Direction::Asc;
        }
    }
}

/// Orders two optional sort keys.
///
/// Present values compare with [`Value::compare`], reversed for
/// [`Direction::Desc`]. Missing values (and `Null`) always come after present
/// ones whatever the direction.
pub fn compare_keys(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.compare(b);
            match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts rows by the key extracted with `key_of`, keeping equal keys in
/// their original relative order.
///
/// Each row is decorated with its input position and ties are broken on that
/// position, so the result is stable without relying on the stability of the
/// underlying sort. Keys are extracted once per row.
///
/// # Example
///
/// ```
/// use engage_lib::model::Value;
/// use engage_lib::table::{stable_sort, Direction};
///
/// let rows = vec![("b", 1), ("a", 2), ("b", 0)];
/// let sorted = stable_sort(&rows, Direction::Asc, |row| Some(Value::from(row.0)));
/// assert_eq!(sorted, vec![&("a", 2), &("b", 1), &("b", 0)]);
/// ```
pub fn stable_sort<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    direction: Direction,
    key_of: F,
) -> Vec<&'a T>
where
    T: 'a,
    F: Fn(&T) -> Option<Value>,
{
    let mut decorated: Vec<(usize, Option<Value>, &'a T)> = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| (index, key_of(row).filter(|v| !v.is_null()), row))
        .collect();

    decorated.sort_unstable_by(|(ia, ka, _), (ib, kb, _)| {
        compare_keys(ka.as_ref(), kb.as_ref(), direction).then(ia.cmp(ib))
    });

    decorated.into_iter().map(|(_, _, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[&(&'static str, i64)]) -> Vec<&'static str> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<(&str, i64)> = Vec::new();
        assert!(stable_sort(&rows, Direction::Asc, |r| Some(Value::from(r.1))).is_empty());
    }

    #[test]
    fn test_equal_keys_keep_original_order_in_both_directions() {
        let rows = vec![("first", 1), ("second", 0), ("third", 1), ("fourth", 0)];

        let asc = stable_sort(&rows, Direction::Asc, |r| Some(Value::from(r.1)));
        assert_eq!(names(&asc), vec!["second", "fourth", "first", "third"]);

        let desc = stable_sort(&rows, Direction::Desc, |r| Some(Value::from(r.1)));
        assert_eq!(names(&desc), vec!["first", "third", "second", "fourth"]);
    }

    #[test]
    fn test_missing_keys_sort_last() {
        let rows = vec![("none-a", -1), ("two", 2), ("none-b", -1), ("one", 1)];
        let key = |r: &(&str, i64)| (r.1 >= 0).then(|| Value::from(r.1));

        let asc = stable_sort(&rows, Direction::Asc, key);
        assert_eq!(names(&asc), vec!["one", "two", "none-a", "none-b"]);

        let desc = stable_sort(&rows, Direction::Desc, key);
        assert_eq!(names(&desc), vec!["two", "one", "none-a", "none-b"]);
    }

    #[test]
    fn test_null_is_treated_as_missing() {
        let rows = vec![("null", 0), ("zero", 0)];
        let sorted = stable_sort(&rows, Direction::Asc, |r| {
            if r.0 == "null" { Some(Value::Null) } else { Some(Value::from(r.1)) }
        });
        assert_eq!(names(&sorted), vec!["zero", "null"]);
    }

    #[test]
    fn test_toggle() {
        let mut sort = SortState::asc("name");
        sort.toggle("name");
        assert_eq!(sort, SortState::desc("name"));
        sort.toggle("name");
        assert_eq!(sort, SortState::asc("name"));
        sort.toggle("status");
        assert_eq!(sort, SortState::asc("status"));
    }
}
