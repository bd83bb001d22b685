//! Error types for Cafe Intel.

use thiserror::Error;

/// Result type alias for Cafe Intel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Cafe Intel.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Validation errors (20-29)
    #[error("{rows} records have missing required fields ({fields})")]
    MissingRequiredFields { rows: usize, fields: String },

    #[error("{count} duplicate cafe_ids detected ({ids})")]
    DuplicateCafeIds { count: usize, ids: String },

    // Store errors (30-39)
    #[error("raw store error: {0}")]
    RawStore(String),

    #[error("table not found in raw store: {0}")]
    TableNotFound(String),

    #[error("derived store error: {0}")]
    DerivedStore(String),

    // Report errors (40-49)
    #[error("chart rendering failed: {0}")]
    Render(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in the ferry summary.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::MissingRequiredFields { .. } => 20,
            Error::DuplicateCafeIds { .. } => 21,
            Error::RawStore(_) => 30,
            Error::TableNotFound(_) => 31,
            Error::DerivedStore(_) => 32,
            Error::Render(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// True for the fatal validation errors that abort a ferry run
    /// before anything is written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingRequiredFields { .. } | Error::DuplicateCafeIds { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_flagged() {
        let err = Error::DuplicateCafeIds {
            count: 2,
            ids: "4, 7".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(err.code(), 21);
    }

    #[test]
    fn config_error_is_not_validation() {
        let err = Error::Config("bad bounds".to_string());
        assert!(!err.is_validation());
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn missing_required_message_names_fields() {
        let err = Error::MissingRequiredFields {
            rows: 3,
            fields: "name, neighborhood".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 records"));
        assert!(msg.contains("neighborhood"));
    }
}
