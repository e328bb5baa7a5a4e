//! Store error types.

/// Errors from the dataset store.
///
/// Any of these aborts the operation that triggered it: a failing store is
/// reported to the caller as a failure, never silently rendered as an
/// empty departure list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The dataset file could not be opened.
    #[error("failed to open transit dataset at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A query against an opened dataset failed.
    #[error("dataset query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The store is gone or unusable (closed handle, poisoned lock, mock
    /// configured to fail).
    #[error("transit store unavailable: {0}")]
    Unavailable(String),
}
