//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use super::page::DEFAULT_PAGE_SIZE;
use super::page::DEFAULT_ROWS_PER_PAGE;
use super::FilterState;
use super::SortState;

/// Options a caller passes when creating a [`Table`](super::Table).
///
/// # Example
///
/// ```
/// use engage_lib::table::{FilterState, SortState, TableConfig};
///
/// let config = TableConfig::default()
///     .with_default_sort(SortState::desc("created_date"))
///     .with_filter(FilterState::new("status", "open"))
///     .with_page_size(25)
///     .hide_header();
/// assert!(config.hide_header);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Initial filter.
    pub filter: Option<FilterState>,

    /// Initial ordering.
    pub default_sort: Option<SortState>,

    /// Suppress the header row.
    pub hide_header: bool,

    /// Suppress separators between rows.
    pub no_row_border: bool,

    /// Initial page size.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Choices offered by a rows-per-page selector.
    ///
    /// Default: 5, 10, 25
    pub rows_per_page: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_sort: None,
            hide_header: false,
            no_row_border: false,
            page_size: DEFAULT_PAGE_SIZE,
            rows_per_page: DEFAULT_ROWS_PER_PAGE.to_vec(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial filter.
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the initial ordering.
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the rows-per-page choices.
    pub fn with_rows_per_page(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.rows_per_page = options.into_iter().collect();
        self
    }

    /// Hides the header row.
    pub fn hide_header(mut self) -> Self {
        self.hide_header = true;
        self
    }

    /// Drops separators between rows.
    pub fn no_row_border(mut self) -> Self {
        self.no_row_border = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TableConfig =
            serde_json::from_str(r#"{"default_sort": {"key": "name"}, "no_row_border": true}"#)
                .unwrap();
        assert_eq!(config.default_sort, Some(SortState::asc("name")));
        assert!(config.no_row_border);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.rows_per_page, vec![5, 10, 25]);
    }
}
