use thiserror::Error;

/// Failures at the storage port. Read-side problems are never surfaced as
/// errors; corrupt or missing documents degrade to empty ones instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write document `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to delete document `{key}`: {source}")]
    Delete {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode document `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("a completed book needs a non-empty title")]
    EmptyBookTitle,
    #[error("contact name cannot be empty")]
    EmptyContactName,
}
