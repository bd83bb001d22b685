//! Cafe Intel reporting stage.
//!
//! Renders the fixed chart families for the two analytical reports from
//! the derived store. Strictly read-only and presentational: every number
//! on a chart was computed by the ferry.

pub mod charts;
pub mod data;
pub mod style;

use thiserror::Error;

/// Errors raised while loading report data or rendering charts.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("store error: {0}")]
    Store(#[from] ci_store::StoreError),

    #[error("query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Collapse a plotters drawing error into a rendering message.
pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}
