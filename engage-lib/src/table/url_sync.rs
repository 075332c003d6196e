//! Mirroring pagination state into the page URL.
//!
//! When a table is shared or bookmarked the current page should come along.
//! [`UrlSync`] writes `page` and `size` query parameters onto the current
//! location through a [`History`] whose `replace_state` swaps the current
//! entry in place: no navigation, no new history entry. All other query
//! parameters are left as they were.
//!
//! The `page` parameter is 1-based, the same as [`ServerPage`].

use log::debug;
use url::Url;

use super::PageState;
use super::PaginationChange;
use super::ServerPage;
use crate::error::UrlSyncError;

/// Query parameter carrying the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size.
pub const SIZE_PARAM: &str = "size";

/// A browsing history that can replace its current entry.
pub trait History: Send {
    /// Returns the current location.
    fn location(&self) -> &Url;

    /// Replaces the current entry without navigating.
    fn replace_state(&mut self, url: Url);

    /// Number of entries in the history.
    fn len(&self) -> usize;

    /// Returns `true` if the history has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-process [`History`].
///
/// # Example
///
/// ```
/// use engage_lib::table::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("https://engage.example/engagements?tab=all").unwrap();
/// assert_eq!(history.location().query(), Some("tab=all"));
/// assert_eq!(history.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Url>,
}

impl MemoryHistory {
    /// Starts a history at `location`.
    pub fn new(location: &str) -> Result<Self, UrlSyncError> {
        let url = Url::parse(location).map_err(|e| UrlSyncError::invalid_url(location, e))?;
        Self::from_url(url)
    }

    /// Starts a history at an already parsed URL.
    pub fn from_url(url: Url) -> Result<Self, UrlSyncError> {
        if url.cannot_be_a_base() {
            return Err(UrlSyncError::CannotBeABase(url.to_string()));
        }
        Ok(Self { entries: vec![url] })
    }

    /// Navigates to a new location, adding an entry.
    pub fn push_state(&mut self, url: Url) {
        self.entries.push(url);
    }

    /// Returns every entry, oldest first.
    pub fn entries(&self) -> &[Url] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Url {
        // `new` always seeds one entry and nothing removes entries.
        &self.entries[self.entries.len() - 1]
    }

    fn replace_state(&mut self, url: Url) {
        if let Some(current) = self.entries.last_mut() {
            *current = url;
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Returns `url` with its `page` and `size` parameters set for `change`.
///
/// Existing `page`/`size` parameters are updated where they stand (extra
/// duplicates are dropped); missing ones are appended. Every other parameter
/// keeps its position and value.
pub fn with_pagination(url: &Url, change: PaginationChange) -> Url {
    let server = change.server_page();
    let page = server.page().to_string();
    let size = server.size().to_string();

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut page_written = false;
    let mut size_written = false;
    for (key, value) in url.query_pairs() {
        if key == PAGE_PARAM {
            if !page_written {
                pairs.push((PAGE_PARAM.to_string(), page.clone()));
                page_written = true;
            }
        } else if key == SIZE_PARAM {
            if !size_written {
                pairs.push((SIZE_PARAM.to_string(), size.clone()));
                size_written = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }
    if !page_written {
        pairs.push((PAGE_PARAM.to_string(), page));
    }
    if !size_written {
        pairs.push((SIZE_PARAM.to_string(), size));
    }

    let mut next = url.clone();
    next.query_pairs_mut().clear().extend_pairs(pairs);
    next
}

/// Reads pagination state back out of a URL.
///
/// Missing, non-numeric or zero values fall back to `defaults` field by
/// field; a bad URL parameter is never an error.
pub fn read_pagination(url: &Url, defaults: PageState) -> PageState {
    let mut page = None;
    let mut size = None;
    for (key, value) in url.query_pairs() {
        if key == PAGE_PARAM && page.is_none() {
            page = value.parse::<usize>().ok().filter(|p| *p > 0);
        } else if key == SIZE_PARAM && size.is_none() {
            size = value.parse::<usize>().ok().filter(|s| *s > 0);
        }
    }

    let size = size.unwrap_or(defaults.page_size());
    let index = match page {
        Some(page) => ServerPage::new(page, size)
            .map(|p| p.to_state().page_index())
            .unwrap_or(defaults.page_index()),
        None => defaults.page_index(),
    };
    PageState::new(index, size).unwrap_or(defaults)
}

/// Keeps a history's current URL in step with a table's pagination.
pub struct UrlSync {
    history: Box<dyn History>,
}

impl std::fmt::Debug for UrlSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSync")
            .field("location", &self.history.location().as_str())
            .finish()
    }
}

impl UrlSync {
    /// Syncs into the given history.
    pub fn new(history: impl History + 'static) -> Self {
        Self {
            history: Box::new(history),
        }
    }

    /// Returns the history being written to.
    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    /// Returns the current location.
    pub fn location(&self) -> &Url {
        self.history.location()
    }

    /// Pagination state encoded in the current location.
    pub fn read(&self, defaults: PageState) -> PageState {
        read_pagination(self.history.location(), defaults)
    }

    /// Writes `change` into the current location with a history replace.
    ///
    /// Calling this repeatedly with the same change leaves the URL and the
    /// history length unchanged.
    pub fn write(&mut self, change: PaginationChange) {
        let next = with_pagination(self.history.location(), change);
        if &next != self.history.location() {
            debug!("replacing location with {}", next);
            self.history.replace_state(next);
        }
    }
}
