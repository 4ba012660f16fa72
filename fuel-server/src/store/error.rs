//! Store error types.

/// Errors that can occur when reading or writing the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A writer panicked while holding the table lock
    #[error("store lock poisoned")]
    Poisoned,

    /// Snapshot file could not be read or written
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file could not be (de)serialized
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
