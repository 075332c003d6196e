//! Pagination and URL sync errors

/// Errors raised when pagination state is changed to something unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// Page size must be at least one row.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// Server pages are numbered from 1.
    #[error("Server page numbers start at 1, got {0}")]
    ZeroServerPage(usize),
}

/// Errors raised while mirroring pagination state into a URL.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UrlSyncError {
    /// The current location could not be parsed as a URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL has no query component to write into (e.g. `mailto:` or `data:`).
    #[error("URL '{0}' cannot carry query parameters")]
    CannotBeABase(String),
}

impl UrlSyncError {
    /// Creates a new invalid URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}
