//! Cafe Intel transform stage (the "ferry").
//!
//! Takes the raw cafe table through validation, standardization,
//! enrichment, partitioning, and aggregation, then writes the derived
//! store. The stage is a single deterministic pass: identical raw input
//! reproduces identical derived tables.

pub mod enrich;
pub mod exit_codes;
pub mod metrics;
pub mod partition;
pub mod pipeline;
pub mod standardize;
pub mod validate;

pub use exit_codes::ExitCode;
pub use pipeline::{run_ferry, FerryOptions, FerrySummary};
pub use validate::{validate, ValidationReport};
