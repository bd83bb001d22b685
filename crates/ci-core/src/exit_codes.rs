//! Exit codes for the ferry CLI.
//!
//! Exit codes communicate run outcome without requiring output parsing,
//! so a pipeline operator can gate reruns on them.

use ci_common::Error;

/// Exit codes for ferry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed, all tables written
    Clean = 0,

    /// Fatal validation finding; nothing written
    ValidationFailed = 2,

    /// Configuration error
    ConfigError = 10,

    /// Raw store unreadable or malformed
    RawStoreError = 11,

    /// Derived store could not be written
    WriteError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Map a pipeline error to its exit code.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) => ExitCode::ConfigError,
            Error::MissingRequiredFields { .. } | Error::DuplicateCafeIds { .. } => {
                ExitCode::ValidationFailed
            }
            Error::RawStore(_) | Error::TableNotFound(_) => ExitCode::RawStoreError,
            Error::DerivedStore(_) => ExitCode::WriteError,
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) | Error::Render(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
