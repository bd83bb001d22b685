//! Storage error types.

use thiserror::Error;

/// Errors raised by raw-store reads and derived-store writes.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("store path has no parent directory: {0}")]
    BadPath(String),
}
