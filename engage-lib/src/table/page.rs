//! Pagination state for in-memory and server-paginated tables.
//!
//! Two numbering conventions exist and they are kept apart on purpose:
//!
//! - [`PageState`] is 0-based and drives slicing of rows held in memory.
//! - [`ServerPage`] is 1-based, matching server-paginated endpoints and the
//!   `page` URL query parameter.
//!
//! Convert explicitly with [`ServerPage::from_state`] and
//! [`ServerPage::to_state`].

use serde::Deserialize;
use serde::Serialize;

use crate::error::PageError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rows-per-page choices offered when none are configured.
pub const DEFAULT_ROWS_PER_PAGE: [usize; 3] = [5, 10, 25];

/// Current page of an in-memory table (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageState")]
pub struct PageState {
    page_index: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct RawPageState {
    page_index: usize,
    page_size: usize,
}

impl TryFrom<RawPageState> for PageState {
    type Error = PageError;

    fn try_from(raw: RawPageState) -> Result<Self, Self::Error> {
        Self::new(raw.page_index, raw.page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// Creates a page state, rejecting a zero page size.
    pub fn new(page_index: usize, page_size: usize) -> Result<Self, PageError> {
        if page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// Returns the 0-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to another page. Indices past the end are allowed and show no rows.
    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PageError> {
        if page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }

    /// Index of the first row on this page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Returns the rows that belong to this page.
    ///
    /// A page past the end yields an empty slice.
    pub fn slice<'s, R>(&self, rows: &'s [R]) -> &'s [R] {
        let start = self.offset().min(rows.len());
        let end = start.saturating_add(self.page_size).min(rows.len());
        &rows[start..end]
    }

    /// Number of pages needed for `total` rows.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Rows missing from this page compared to a full one.
    ///
    /// Renderers use this to pad a trailing partial page so the layout does
    /// not jump.
    pub fn empty_rows(&self, total: usize) -> usize {
        self.page_index
            .saturating_add(1)
            .saturating_mul(self.page_size)
            .saturating_sub(total)
    }

    /// Returns `true` if a page follows this one.
    pub fn has_next(&self, total: usize) -> bool {
        self.page_index.saturating_add(1) < self.page_count(total)
    }
}

/// Derived paging information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Row count after filtering, before slicing.
    pub total: usize,
}

/// Notification sent whenever the page or page size changes.
///
/// Server-paginated callers refetch the page described here; the table
/// itself never fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationChange {
    /// New 0-based page index.
    pub page_index: usize,
    /// New page size.
    pub size: usize,
}

impl PaginationChange {
    /// The same change in 1-based server numbering.
    pub fn server_page(&self) -> ServerPage {
        ServerPage {
            page: self.page_index.saturating_add(1),
            size: self.size,
        }
    }
}

impl From<PageState> for PaginationChange {
    fn from(state: PageState) -> Self {
        Self {
            page_index: state.page_index,
            size: state.page_size,
        }
    }
}

/// Page request for a server-paginated endpoint (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawServerPage")]
pub struct ServerPage {
    page: usize,
    size: usize,
}

#[derive(Deserialize)]
struct RawServerPage {
    page: usize,
    size: usize,
}

impl TryFrom<RawServerPage> for ServerPage {
    type Error = PageError;

    fn try_from(raw: RawServerPage) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.size)
    }
}

impl ServerPage {
    /// Creates a server page, rejecting page 0 and a zero size.
    pub fn new(page: usize, size: usize) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroServerPage(page));
        }
        if size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(Self { page, size })
    }

    /// Converts an in-memory page state.
    pub fn from_state(state: &PageState) -> Self {
        Self {
            page: state.page_index.saturating_add(1),
            size: state.page_size,
        }
    }

    /// Converts back to an in-memory page state.
    pub fn to_state(&self) -> PageState {
        PageState {
            page_index: self.page.saturating_sub(1),
            page_size: self.size,
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the number of rows per page.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first row on this page in the full result set.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_pages() {
        let rows: Vec<u32> = (0..7).collect();
        let mut page = PageState::new(0, 3).unwrap();
        assert_eq!(page.slice(&rows), &[0, 1, 2]);
        page.set_page(2);
        assert_eq!(page.slice(&rows), &[6]);
        page.set_page(5);
        assert!(page.slice(&rows).is_empty());
    }

    #[test]
    fn test_pages_cover_all_rows_exactly_once() {
        let rows: Vec<u32> = (0..23).collect();
        for size in 1..=25 {
            let mut page = PageState::new(0, size).unwrap();
            let mut seen = Vec::new();
            for index in 0..page.page_count(rows.len()) {
                page.set_page(index);
                seen.extend_from_slice(page.slice(&rows));
            }
            assert_eq!(seen, rows, "page size {}", size);
        }
    }

    #[test]
    fn test_page_size_change_resets_index() {
        let mut page = PageState::new(4, 10).unwrap();
        page.set_page_size(25).unwrap();
        assert_eq!(page, PageState::new(0, 25).unwrap());
        assert_eq!(page.set_page_size(0), Err(PageError::ZeroPageSize));
        assert_eq!(page.page_size(), 25);
    }

    #[test]
    fn test_empty_rows_on_trailing_page() {
        let mut page = PageState::new(0, 10).unwrap();
        assert_eq!(page.empty_rows(23), 0);
        page.set_page(2);
        assert_eq!(page.empty_rows(23), 7);
        assert_eq!(PageState::default().empty_rows(0), 10);
    }

    #[test]
    fn test_has_next() {
        let mut page = PageState::new(0, 10).unwrap();
        assert!(page.has_next(11));
        page.set_page(1);
        assert!(!page.has_next(11));
        assert!(!PageState::default().has_next(0));
    }

    #[test]
    fn test_server_page_conversion() {
        let state = PageState::new(2, 25).unwrap();
        let server = ServerPage::from_state(&state);
        assert_eq!(server.page(), 3);
        assert_eq!(server.offset(), 50);
        assert_eq!(server.to_state(), state);
        assert_eq!(ServerPage::new(0, 10), Err(PageError::ZeroServerPage(0)));
        assert_eq!(PaginationChange::from(state).server_page(), server);
    }

    #[test]
    fn test_last_possible_page_converts_without_overflow() {
        let mut state = PageState::new(0, 10).unwrap();
        state.set_page(usize::MAX);
        let server = ServerPage::from_state(&state);
        assert_eq!(server.page(), usize::MAX);
        assert_eq!(PaginationChange::from(state).server_page(), server);
        assert!(state.slice(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let state: PageState =
            serde_json::from_str(r#"{"page_index": 2, "page_size": 5}"#).unwrap();
        assert_eq!(state, PageState::new(2, 5).unwrap());
        assert!(serde_json::from_str::<PageState>(r#"{"page_index": 0, "page_size": 0}"#).is_err());

        let server: ServerPage = serde_json::from_str(r#"{"page": 1, "size": 10}"#).unwrap();
        assert_eq!(server.to_state(), PageState::new(0, 10).unwrap());
        assert!(serde_json::from_str::<ServerPage>(r#"{"page": 0, "size": 10}"#).is_err());
    }
}
