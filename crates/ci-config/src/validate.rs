//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating a ferry configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Semantic(String),
}
