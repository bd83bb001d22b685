//! Cafe Intel SQLite storage.
//!
//! This crate provides:
//! - Raw-store reading (the collected `cafes` table)
//! - Derived-store table shapes and DDL
//! - An atomic derived-store writer (temp file, rename on success)
//! - Read-only access for the reporting stage

pub mod error;
pub mod raw;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::StoreError;
pub use raw::{list_tables, read_raw_cafes};
pub use reader::open_readonly;
pub use schema::{DerivedTables, FieldCompleteness, RunMetadata, TableName, TierCount};
pub use writer::write_derived_store;
