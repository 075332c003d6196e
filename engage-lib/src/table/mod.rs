//! Sortable, filterable, paginated tables.
//!
//! The pipeline runs in a fixed order every time a [`Table`] is viewed:
//!
//! 1. [`filter_rows`] narrows the rows with a case-insensitive substring
//!    match on one field.
//! 2. [`stable_sort`] orders what is left by one field.
//! 3. [`PageState::slice`] cuts out the current page.
//!
//! # Shared Types
//!
//! - [`Row`] - Field access contract every row type implements
//! - [`Column`] - Header label, sortability and value access for one column
//! - [`SortState`], [`FilterState`], [`PageState`] - View state
//! - [`ServerPage`] - 1-based page request for server-paginated endpoints
//! - [`UrlSync`] - Mirrors pagination into the page URL

mod column;
mod config;
mod filter;
mod page;
mod render;
mod row;
mod sort;
mod state;
mod url_sync;

pub use column::Alignment;
pub use column::Column;
pub use config::TableConfig;
pub use filter::FilterState;
pub use filter::filter_rows;
pub use page::DEFAULT_PAGE_SIZE;
pub use page::DEFAULT_ROWS_PER_PAGE;
pub use page::PageInfo;
pub use page::PageState;
pub use page::PaginationChange;
pub use page::ServerPage;
pub use row::Row;
pub use sort::Direction;
pub use sort::SortState;
pub use sort::compare_keys;
pub use sort::stable_sort;
pub use state::Table;
pub use state::TableView;
pub use url_sync::History;
pub use url_sync::MemoryHistory;
pub use url_sync::PAGE_PARAM;
pub use url_sync::SIZE_PARAM;
pub use url_sync::UrlSync;
pub use url_sync::read_pagination;
pub use url_sync::with_pagination;
