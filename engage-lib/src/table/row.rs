//! Row access contract

use crate::model::Value;

/// A record that can be shown in a [`Table`](super::Table).
///
/// The table never inspects rows directly; it asks for one field at a time
/// by key and works on the returned [`Value`]. Returning `None` means the
/// row has no such field, which the table treats as "missing" rather than
/// as an error: missing values sort last and never match a filter.
///
/// # Example
///
/// ```
/// use engage_lib::model::Value;
/// use engage_lib::table::Row;
///
/// struct Comment {
///     author: String,
///     likes: i64,
/// }
///
/// impl Row for Comment {
///     fn field(&self, key: &str) -> Option<Value> {
///         match key {
///             "author" => Some(self.author.as_str().into()),
///             "likes" => Some(self.likes.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value stored under `key`, or `None` if the row lacks it.
    fn field(&self, key: &str) -> Option<Value>;
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}
