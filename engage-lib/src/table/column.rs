//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use super::Row;
use crate::model::Value;

type Accessor<T> = Arc<dyn Fn(&T) -> Option<Value> + Send + Sync>;
type Renderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Describes how one column is labelled, sorted and displayed.
///
/// By default a column reads its value with [`Row::field`] using its key.
/// An explicit [`accessor`](Column::accessor) replaces that lookup, and a
/// [`render`](Column::render) function replaces the displayed text.
///
/// # Examples
///
/// ```
/// use engage_lib::model::{Engagement, Value};
/// use engage_lib::table::Column;
///
/// let columns: Vec<Column<Engagement>> = vec![
///     Column::new("name", "Engagement").sortable(),
///     Column::new("survey_count", "Surveys").sortable().numeric(),
///     Column::new("period", "Open period")
///         .accessor(|e: &Engagement| e.start_date.map(Value::from))
///         .render(|e: &Engagement| match (e.start_date, e.end_date) {
///             (Some(s), Some(end)) => format!("{} to {}", s, end),
///             _ => "Not scheduled".to_string(),
///         }),
/// ];
/// ```
pub struct Column<T> {
    /// Field key, also used by sort and filter state.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Whether the column holds numbers (right-aligned).
    pub numeric: bool,
    accessor: Option<Accessor<T>>,
    render: Option<Renderer<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            numeric: self.numeric,
            accessor: self.accessor.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("numeric", &self.numeric)
            .field("accessor", &self.accessor.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl<T> Column<T> {
    /// Creates a plain column reading field `key`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            numeric: false,
            accessor: None,
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark the column as numeric.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Read the column's value with `f` instead of [`Row::field`].
    pub fn accessor(mut self, f: impl Fn(&T) -> Option<Value> + Send + Sync + 'static) -> Self {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Display the column with `f` instead of the value's text.
    pub fn render(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// Alignment renderers should use for this column.
    pub fn alignment(&self) -> Alignment {
        if self.numeric { Alignment::Right } else { Alignment::Left }
    }
}

impl<T: Row> Column<T> {
    /// The value this column sorts and filters on.
    pub fn value(&self, row: &T) -> Option<Value> {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => row.field(&self.key),
        }
    }

    /// The text shown in this column's cell.
    pub fn display(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}
