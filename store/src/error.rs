//! Error types for the persistence layer

/// Errors surfaced by the stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup by id or key matched no row. Expected on first run.
    #[error("not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
