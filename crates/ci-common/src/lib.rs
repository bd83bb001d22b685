//! Cafe Intel common types and errors.
//!
//! This crate provides foundational types shared across the pipeline crates:
//! - Raw and enriched cafe record types
//! - Derived-field enums with their wire-contract labels
//! - Common error types
//! - Schema versioning

pub mod error;
pub mod record;
pub mod schema;

pub use error::{Error, Result};
pub use record::{
    BusinessType, EnrichedCafe, LocationZone, PriceCategory, QualityFlags, QualityTier, RawCafe,
};
pub use schema::SCHEMA_VERSION;
