//! Store error types

use thiserror::Error;

/// Errors raised by the content store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Content already exists: {0}")]
    Duplicate(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON column error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid row {id}: {message}")]
    InvalidRow { id: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}
