//! Cafe Intel ferry configuration.
//!
//! This crate provides:
//! - Typed structs for the ferry configuration file
//! - JSON loading with an embedded compile-time default
//! - Semantic validation (ordered bounds, ascending bin edges)

pub mod ferry;
pub mod validate;

pub use ferry::{FerryBins, FerryConfig, GeoBounds, GeoPoint, PriceRange};
pub use validate::ConfigError;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
