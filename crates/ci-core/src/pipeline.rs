//! The ferry pipeline.
//!
//! Stage order is fixed: validate, standardize, enrich, partition and
//! aggregate, write. A fatal validation finding aborts before anything is
//! written; any later failure also aborts the run, and the atomic writer
//! guarantees no partial store becomes visible. Rerunning on the same
//! input reproduces the same derived tables.

use std::path::PathBuf;

use chrono::Utc;
use ci_common::{EnrichedCafe, Error, Result};
use ci_config::FerryConfig;
use ci_store::{
    read_raw_cafes, write_derived_store, DerivedTables, RunMetadata, TierCount,
};
use tracing::info;
use uuid::Uuid;

use crate::enrich::enrich;
use crate::metrics::{
    completeness_metrics, low_completeness_fields, mean_completeness, quality_distribution,
};
use crate::partition::partition;
use crate::standardize::standardize;
use crate::validate::validate;

/// Threshold below which a field is called out as low-completeness.
const LOW_COMPLETENESS_THRESHOLD: f64 = 0.75;

/// Inputs for one ferry run.
#[derive(Debug, Clone)]
pub struct FerryOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: FerryConfig,
}

/// What a completed run looked like, for the summary report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FerrySummary {
    pub run_id: String,
    pub input_records: usize,
    pub output_records: usize,
    pub validation_warnings: usize,
    pub location_warnings: usize,
    pub price_warnings: usize,
    pub rating_warnings: usize,
    pub review_count_warnings: usize,
    pub avg_completeness: f64,
    pub low_completeness_fields: Vec<String>,
    pub quality_distribution: Vec<TierCount>,
    pub soc_count: usize,
    pub soc_mean_quality: Option<f64>,
    pub competitor_count: usize,
    pub competitor_mean_quality: Option<f64>,
}

/// Run the full transform stage: raw store in, derived store out.
pub fn run_ferry(opts: &FerryOptions) -> Result<FerrySummary> {
    opts.config
        .validate()
        .map_err(|e| Error::Config(e.to_string()))?;
    let bins = opts
        .config
        .bins()
        .map_err(|e| Error::Config(e.to_string()))?;

    info!(input = %opts.input.display(), "loading raw data");
    let raw = read_raw_cafes(&opts.input).map_err(|e| Error::RawStore(e.to_string()))?;
    info!(records = raw.len(), "raw data loaded");

    let report = validate(&raw, &opts.config)?;

    let standardized = standardize(&raw, &report);
    info!("categorical fields standardized");

    let enriched = enrich(&standardized, &report, &opts.config, &bins);

    let (soc, competitors) = partition(&enriched);

    let completeness = completeness_metrics(&raw);
    let distribution = quality_distribution(&enriched);
    let avg_completeness = mean_completeness(&completeness);

    let run_id = Uuid::new_v4().to_string();
    let metadata = RunMetadata {
        run_id: run_id.clone(),
        ferry_date: Utc::now(),
        ferry_version: env!("CARGO_PKG_VERSION").to_string(),
        sqlite_version: rusqlite::version().to_string(),
        input_file: opts.input.display().to_string(),
        input_records: raw.len() as i64,
        output_file: opts.output.display().to_string(),
        output_records: enriched.len() as i64,
        validation_errors: 0,
        validation_warnings: report.total_warnings() as i64,
        avg_completeness,
    };

    let summary = FerrySummary {
        run_id,
        input_records: raw.len(),
        output_records: enriched.len(),
        validation_warnings: report.total_warnings(),
        location_warnings: report.location_warnings(),
        price_warnings: report.price_warnings(),
        rating_warnings: report.rating_warnings(),
        review_count_warnings: report.review_count_warnings(),
        avg_completeness,
        low_completeness_fields: low_completeness_fields(
            &completeness,
            LOW_COMPLETENESS_THRESHOLD,
        ),
        quality_distribution: distribution.clone(),
        soc_count: soc.len(),
        soc_mean_quality: mean_quality_score(&soc),
        competitor_count: competitors.len(),
        competitor_mean_quality: mean_quality_score(&competitors),
    };

    let tables = DerivedTables {
        cafes_complete: enriched,
        soc_locations: soc,
        competitors,
        completeness_metrics: completeness,
        quality_distribution: distribution,
        metadata,
    };
    write_derived_store(&opts.output, &tables)
        .map_err(|e| Error::DerivedStore(e.to_string()))?;

    Ok(summary)
}

/// Mean of the non-null quality scores in a subset.
fn mean_quality_score(cafes: &[EnrichedCafe]) -> Option<f64> {
    let scores: Vec<f64> = cafes.iter().filter_map(|c| c.quality_score).collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
