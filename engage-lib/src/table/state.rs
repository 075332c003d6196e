//! The table coordinator: owns rows and view state, answers events.

use log::debug;
use log::trace;

use super::Column;
use super::FilterState;
use super::PageInfo;
use super::PageState;
use super::PaginationChange;
use super::Row;
use super::SortState;
use super::TableConfig;
use super::UrlSync;
use super::filter_rows;
use super::stable_sort;
use crate::error::PageError;
use crate::model::Value;

/// What a table shows right now.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, T> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Paging totals for the filtered rows.
    pub info: PageInfo,
    /// Current page.
    pub page: PageState,
    /// Rows needed to pad a trailing partial page.
    pub empty_rows: usize,
    /// Active ordering, if any.
    pub sort: Option<&'a SortState>,
}

/// A sortable, filterable, paginated table over rows of type `T`.
///
/// Every state change happens through an event method (`click_header`,
/// `set_page`, `set_page_size`, `submit_filter`) and [`Table::view`] derives
/// the visible rows: filter, then sort, then slice.
///
/// # Example
///
/// ```
/// use engage_lib::model::Record;
/// use engage_lib::table::{Column, FilterState, Table, TableConfig};
///
/// let rows = vec![
///     Record::new().set("name", "Bravo"),
///     Record::new().set("name", "alpha"),
///     Record::new().set("name", "Charlie"),
/// ];
/// let columns = vec![Column::new("name", "Name").sortable()];
/// let config = TableConfig::default()
///     .with_filter(FilterState::new("name", "a"))
///     .with_page_size(2);
///
/// let mut table = Table::with_config(columns, rows, config).unwrap();
/// table.click_header("name");
///
/// let view = table.view();
/// assert_eq!(view.info.total, 3);
/// assert_eq!(view.rows.len(), 2);
/// ```
#[derive(Debug)]
pub struct Table<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    config: TableConfig,
    sort: Option<SortState>,
    filter: FilterState,
    page: PageState,
    url_sync: Option<UrlSync>,
}

impl<T: Row> Table<T> {
    /// Creates a table with the default configuration.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        Self {
            columns,
            rows,
            config: TableConfig::default(),
            sort: None,
            filter: FilterState::default(),
            page: PageState::default(),
            url_sync: None,
        }
    }

    /// Creates a table with initial sort, filter and page size from `config`.
    pub fn with_config(
        columns: Vec<Column<T>>,
        rows: Vec<T>,
        config: TableConfig,
    ) -> Result<Self, PageError> {
        let page = PageState::new(0, config.page_size)?;
        Ok(Self {
            columns,
            rows,
            sort: config.default_sort.clone(),
            filter: config.filter.clone().unwrap_or_default(),
            page,
            config,
            url_sync: None,
        })
    }

    /// Mirrors pagination into a URL from now on.
    ///
    /// Page and size already present in the URL are adopted first, so a
    /// bookmarked link reopens on the same page.
    pub fn enable_url_sync(&mut self, sync: UrlSync) {
        self.page = sync.read(self.page);
        debug!(
            "url sync enabled at page {} size {}",
            self.page.page_index(),
            self.page.page_size()
        );
        self.url_sync = Some(sync);
    }

    /// Stops mirroring pagination and hands back the sync.
    pub fn disable_url_sync(&mut self) -> Option<UrlSync> {
        self.url_sync.take()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the column descriptors.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Returns every row, unfiltered and unsorted.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns the configuration the table was built with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the active sort.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Returns the active filter.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Returns the current page state.
    pub fn page(&self) -> PageState {
        self.page
    }

    /// Returns the URL sync, if enabled.
    pub fn url_sync(&self) -> Option<&UrlSync> {
        self.url_sync.as_ref()
    }

    /// Looks up a column by key.
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Resolves `key` on `row` through its column, falling back to the row.
    fn value_of(&self, row: &T, key: &str) -> Option<Value> {
        match self.column(key) {
            Some(column) => column.value(row),
            None => row.field(key),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handles a click on a column header.
    ///
    /// Returns `false` (and changes nothing) for unknown or non-sortable
    /// columns.
    pub fn click_header(&mut self, key: &str) -> bool {
        if !self.column(key).is_some_and(|c| c.sortable) {
            trace!("ignoring header click on '{}'", key);
            return false;
        }
        match &mut self.sort {
            Some(sort) => sort.toggle(key),
            None => self.sort = Some(SortState::asc(key)),
        }
        debug!("sort is now {:?}", self.sort);
        true
    }

    /// Sets the ordering directly.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Moves to a page (0-based).
    pub fn set_page(&mut self, page_index: usize) -> PaginationChange {
        self.page.set_page(page_index);
        self.pagination_changed()
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<PaginationChange, PageError> {
        self.page.set_page_size(page_size)?;
        Ok(self.pagination_changed())
    }

    /// Applies a submitted filter and returns to the first page.
    pub fn submit_filter(&mut self, filter: FilterState) -> PaginationChange {
        debug!("filter submitted: {:?}", filter);
        self.filter = filter;
        self.page.set_page(0);
        self.pagination_changed()
    }

    /// Replaces the rows, keeping sort, filter and page.
    ///
    /// Used after a server-paginated refetch.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }

    fn pagination_changed(&mut self) -> PaginationChange {
        let change = PaginationChange::from(self.page);
        debug!(
            "pagination changed to page {} size {}",
            change.page_index, change.size
        );
        if let Some(sync) = &mut self.url_sync {
            sync.write(change);
        }
        change
    }

    // =========================================================================
    // Derived view
    // =========================================================================

    /// All rows passing the filter, in display order.
    pub fn ordered_rows(&self) -> Vec<&T> {
        let filtered = filter_rows(&self.rows, &self.filter, |row| {
            self.value_of(row, &self.filter.key)
        });
        match &self.sort {
            Some(sort) => stable_sort(filtered, sort.direction, |row| {
                self.value_of(row, &sort.key)
            }),
            None => filtered,
        }
    }

    /// Paging totals for the current filter.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            total: filter_rows(&self.rows, &self.filter, |row| {
                self.value_of(row, &self.filter.key)
            })
            .len(),
        }
    }

    /// Derives the current page.
    pub fn view(&self) -> TableView<'_, T> {
        let ordered = self.ordered_rows();
        let total = ordered.len();
        let rows = self.page.slice(&ordered).to_vec();
        TableView {
            rows,
            info: PageInfo { total },
            page: self.page,
            empty_rows: self.page.empty_rows(total),
            sort: self.sort.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::table::Direction;
    use crate::table::History;
    use crate::table::MemoryHistory;

    fn names(view: &TableView<'_, Record>) -> Vec<String> {
        view.rows
            .iter()
            .map(|r| r.get_string("name").unwrap().unwrap_or_default().to_string())
            .collect()
    }

    fn table(names: &[&str]) -> Table<Record> {
        let rows = names.iter().map(|n| Record::new().set("name", *n)).collect();
        Table::new(
            vec![
                Column::new("name", "Name").sortable(),
                Column::new("note", "Note"),
            ],
            rows,
        )
    }

    #[test]
    fn test_header_clicks_cycle_direction() {
        let mut table = table(&["b", "a", "c"]);
        assert!(table.click_header("name"));
        assert_eq!(names(&table.view()), vec!["a", "b", "c"]);
        assert!(table.click_header("name"));
        assert_eq!(table.sort().map(|s| s.direction), Some(Direction::Desc));
        assert_eq!(names(&table.view()), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_non_sortable_header_is_ignored() {
        let mut table = table(&["b", "a"]);
        assert!(!table.click_header("note"));
        assert!(!table.click_header("missing"));
        assert_eq!(table.sort(), None);
        assert_eq!(names(&table.view()), vec!["b", "a"]);
    }

    #[test]
    fn test_filter_resets_page_and_total_counts_filtered_rows() {
        let mut table = table(&["oak", "pine", "oakwood", "elm", "cork oak"]);
        table.set_page_size(2).unwrap();
        table.set_page(1);

        let change = table.submit_filter(FilterState::new("name", "OAK"));
        assert_eq!(change.page_index, 0);

        let view = table.view();
        assert_eq!(view.info.total, 3);
        assert_eq!(names(&view), vec!["oak", "oakwood"]);
        assert_eq!(table.page_info().total, 3);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let mut table = table(&["a", "b", "c"]);
        table.set_page(7);
        let view = table.view();
        assert!(view.rows.is_empty());
        assert_eq!(view.info.total, 3);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let mut table = table(&["a"]);
        assert_eq!(table.set_page_size(0), Err(PageError::ZeroPageSize));
        let config = TableConfig::default().with_page_size(0);
        assert!(Table::with_config(Vec::new(), Vec::<Record>::new(), config).is_err());
    }

    #[test]
    fn test_url_sync_reads_then_writes() {
        let mut table = table(&["a", "b", "c", "d", "e", "f"]);
        let history =
            MemoryHistory::new("https://engage.example/engagements?page=2&size=2").unwrap();
        table.enable_url_sync(UrlSync::new(history));
        assert_eq!(table.page(), PageState::new(1, 2).unwrap());
        assert_eq!(names(&table.view()), vec!["c", "d"]);

        table.set_page(2);
        let sync = table.url_sync().unwrap();
        assert_eq!(sync.location().query(), Some("page=3&size=2"));
        assert_eq!(sync.history().len(), 1);
    }

    #[test]
    fn test_last_possible_page_with_url_sync() {
        let mut table = table(&["a", "b"]);
        let history = MemoryHistory::new("https://engage.example/engagements").unwrap();
        table.enable_url_sync(UrlSync::new(history));

        let change = table.set_page(usize::MAX);
        assert_eq!(change.server_page().page(), usize::MAX);
        assert!(table.view().rows.is_empty());
        assert!(table.render_text().ends_with("(2 rows)\n"));
    }

    #[test]
    fn test_empty_row_set() {
        let table = Table::new(vec![Column::new("name", "Name")], Vec::<Record>::new());
        let view = table.view();
        assert_eq!(view.info.total, 0);
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_rows, view.page.page_size());
        assert_eq!(table.render_text(), "Name\n====\npage 1 of 1 (0 rows)\n");
    }
}
