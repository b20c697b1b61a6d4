//! Error types for DocDeck

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocdeckError {
    // Client-side validation, blocks the remote call
    #[error("Invalid collection name '{name}': only letters, digits, underscore and hyphen are allowed")]
    InvalidCollectionName { name: String },

    // Stale selection, entity deleted elsewhere
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("A collection named '{name}' already exists")]
    Conflict { name: String },

    // Per-file, never aborts the rest of a batch
    #[error("Upload of '{file_name}' failed: {reason}")]
    Upload { file_name: String, reason: String },

    #[error("Backend request failed: {reason}")]
    Transport { reason: String },

    // The backend does not accept concurrent writes into one collection,
    // so a second batch is rejected instead of interleaved
    #[error("An upload batch is already in flight")]
    BatchInFlight,

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocdeckError>;
