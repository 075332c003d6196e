//! Error types

mod field;
mod table;
mod validation;

pub use field::*;
pub use table::*;
pub use validation::*;

/// Top-level error for operations that can fail in more than one way.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record field was missing or had an unexpected type.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Pagination state was rejected.
    #[error(transparent)]
    Page(#[from] PageError),

    /// URL synchronization failed.
    #[error(transparent)]
    UrlSync(#[from] UrlSyncError),

    /// One or more input fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
