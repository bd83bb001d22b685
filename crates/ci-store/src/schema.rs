//! Derived-store table shapes and DDL.
//!
//! Column names and label strings are the wire contract the reporting
//! stage depends on; changes here are breaking (see
//! `ci_common::SCHEMA_VERSION`).

use chrono::{DateTime, Utc};
use ci_common::EnrichedCafe;
use serde::{Deserialize, Serialize};

/// The six derived-store tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableName {
    CafesComplete,
    SocLocations,
    Competitors,
    CompletenessMetrics,
    QualityDistribution,
    Metadata,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::CafesComplete,
        TableName::SocLocations,
        TableName::Competitors,
        TableName::CompletenessMetrics,
        TableName::QualityDistribution,
        TableName::Metadata,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableName::CafesComplete => "cafes_complete",
            TableName::SocLocations => "soc_locations",
            TableName::Competitors => "competitors",
            TableName::CompletenessMetrics => "completeness_metrics",
            TableName::QualityDistribution => "quality_distribution",
            TableName::Metadata => "metadata",
        }
    }
}

/// Per-field completeness over the raw table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCompleteness {
    pub field: String,
    pub total_records: i64,
    pub complete_count: i64,
    pub missing_count: i64,
    pub complete_rate: f64,
}

/// One quality tier's share of the enriched table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    pub quality_tier: String,
    pub count: i64,
    pub percentage: f64,
}

/// Provenance record for a single ferry run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: String,
    pub ferry_date: DateTime<Utc>,
    pub ferry_version: String,
    pub sqlite_version: String,
    pub input_file: String,
    pub input_records: i64,
    pub output_file: String,
    pub output_records: i64,
    pub validation_errors: i64,
    pub validation_warnings: i64,
    pub avg_completeness: f64,
}

/// Everything one ferry run writes, assembled before any I/O happens.
#[derive(Debug, Clone)]
pub struct DerivedTables {
    pub cafes_complete: Vec<EnrichedCafe>,
    pub soc_locations: Vec<EnrichedCafe>,
    pub competitors: Vec<EnrichedCafe>,
    pub completeness_metrics: Vec<FieldCompleteness>,
    pub quality_distribution: Vec<TierCount>,
    pub metadata: RunMetadata,
}

/// Columns shared by `cafes_complete` and the two subset tables
/// (standardized raw columns followed by the derived columns).
const ENRICHED_COLUMNS: &str = "\
    cafe_id INTEGER,\n\
    name TEXT,\n\
    address TEXT,\n\
    neighborhood TEXT,\n\
    latitude REAL,\n\
    longitude REAL,\n\
    phone TEXT,\n\
    website TEXT,\n\
    cafe_type TEXT,\n\
    ownership TEXT,\n\
    avg_beverage_price REAL,\n\
    has_food TEXT,\n\
    has_wifi TEXT,\n\
    seating_capacity INTEGER,\n\
    ambiance TEXT,\n\
    parking_availability TEXT,\n\
    hours_weekday TEXT,\n\
    hours_weekend TEXT,\n\
    date_opened TEXT,\n\
    instagram_handle TEXT,\n\
    google_rating REAL,\n\
    review_count INTEGER,\n\
    created_at TEXT,\n\
    updated_at TEXT,\n";

const DERIVED_COLUMNS: &str = "\
    price_category TEXT,\n\
    popularity_percentile REAL,\n\
    quality_score REAL,\n\
    distance_from_downtown REAL,\n\
    location_zone TEXT,\n\
    flag_missing_location INTEGER,\n\
    flag_no_rating INTEGER,\n\
    flag_no_price INTEGER,\n\
    flag_location_out_of_bounds INTEGER,\n\
    flag_suspicious_price INTEGER,\n\
    quality_flag_count INTEGER,\n\
    quality_tier TEXT\n";

/// DDL for the full derived store.
pub fn derived_store_ddl() -> String {
    format!(
        "CREATE TABLE cafes_complete (\n{ENRICHED_COLUMNS}    is_soc INTEGER,\n{DERIVED_COLUMNS});\n\
         CREATE TABLE soc_locations (\n{ENRICHED_COLUMNS}{DERIVED_COLUMNS});\n\
         CREATE TABLE competitors (\n{ENRICHED_COLUMNS}{DERIVED_COLUMNS});\n\
         CREATE TABLE completeness_metrics (\n\
             field TEXT,\n\
             total_records INTEGER,\n\
             complete_count INTEGER,\n\
             missing_count INTEGER,\n\
             complete_rate REAL\n\
         );\n\
         CREATE TABLE quality_distribution (\n\
             quality_tier TEXT,\n\
             count INTEGER,\n\
             percentage REAL\n\
         );\n\
         CREATE TABLE metadata (\n\
             run_id TEXT,\n\
             ferry_date TEXT,\n\
             ferry_version TEXT,\n\
             sqlite_version TEXT,\n\
             input_file TEXT,\n\
             input_records INTEGER,\n\
             output_file TEXT,\n\
             output_records INTEGER,\n\
             validation_errors INTEGER,\n\
             validation_warnings INTEGER,\n\
             avg_completeness REAL\n\
         );\n"
    )
}
