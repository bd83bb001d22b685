//! Atomic derived-store writer.
//!
//! The full store is built at a sibling `.tmp` path and renamed over the
//! target only after every table has been committed. A failure anywhere
//! removes the temp file and leaves the previous store untouched, so a
//! partially-written store is never visible.

use std::fs;
use std::path::{Path, PathBuf};

use ci_common::EnrichedCafe;
use rusqlite::{Connection, ToSql, Transaction};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::schema::{derived_store_ddl, DerivedTables};

/// Write all six derived tables to `path`, replacing any prior store.
pub fn write_derived_store(path: &Path, tables: &DerivedTables) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            info!(dir = %parent.display(), "created output directory");
        }
    }

    let tmp = temp_path(path)?;
    if tmp.exists() {
        fs::remove_file(&tmp)?;
    }

    match build_store(&tmp, tables) {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            info!(path = %path.display(), "derived store written");
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn temp_path(path: &Path) -> Result<PathBuf, StoreError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::BadPath(path.display().to_string()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn build_store(path: &Path, tables: &DerivedTables) -> Result<(), StoreError> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(&derived_store_ddl())?;

    let tx = conn.transaction()?;
    insert_enriched(&tx, "cafes_complete", true, &tables.cafes_complete)?;
    insert_enriched(&tx, "soc_locations", false, &tables.soc_locations)?;
    insert_enriched(&tx, "competitors", false, &tables.competitors)?;
    insert_completeness(&tx, tables)?;
    insert_quality_distribution(&tx, tables)?;
    insert_metadata(&tx, tables)?;
    tx.commit()?;

    debug!(
        cafes = tables.cafes_complete.len(),
        soc = tables.soc_locations.len(),
        competitors = tables.competitors.len(),
        "derived tables staged"
    );
    Ok(())
}

const RAW_COLUMN_LIST: &str = "cafe_id, name, address, neighborhood, latitude, longitude, \
    phone, website, cafe_type, ownership, avg_beverage_price, has_food, has_wifi, \
    seating_capacity, ambiance, parking_availability, hours_weekday, hours_weekend, \
    date_opened, instagram_handle, google_rating, review_count, created_at, updated_at";

const DERIVED_COLUMN_LIST: &str = "price_category, popularity_percentile, quality_score, \
    distance_from_downtown, location_zone, flag_missing_location, flag_no_rating, \
    flag_no_price, flag_location_out_of_bounds, flag_suspicious_price, quality_flag_count, \
    quality_tier";

fn insert_enriched(
    tx: &Transaction<'_>,
    table: &str,
    include_is_soc: bool,
    cafes: &[EnrichedCafe],
) -> Result<(), StoreError> {
    let columns = if include_is_soc {
        format!("{RAW_COLUMN_LIST}, is_soc, {DERIVED_COLUMN_LIST}")
    } else {
        format!("{RAW_COLUMN_LIST}, {DERIVED_COLUMN_LIST}")
    };
    let count = columns.split(',').count();
    let placeholders = vec!["?"; count].join(", ");
    let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");
    let mut stmt = tx.prepare(&sql)?;

    for cafe in cafes {
        let r = &cafe.record;
        let is_soc = cafe.is_soc();
        let price_category = cafe.price_category.map(|c| c.as_str());
        let location_zone = cafe.location_zone.map(|z| z.as_str());
        let quality_tier = cafe.quality_tier.map(|t| t.as_str());
        let flag_count = cafe.quality_flag_count() as i64;

        let mut values: Vec<&dyn ToSql> = vec![
            &r.cafe_id,
            &r.name,
            &r.address,
            &r.neighborhood,
            &r.latitude,
            &r.longitude,
            &r.phone,
            &r.website,
            &r.cafe_type,
            &r.ownership,
            &r.avg_beverage_price,
            &r.has_food,
            &r.has_wifi,
            &r.seating_capacity,
            &r.ambiance,
            &r.parking_availability,
            &r.hours_weekday,
            &r.hours_weekend,
            &r.date_opened,
            &r.instagram_handle,
            &r.google_rating,
            &r.review_count,
            &r.created_at,
            &r.updated_at,
        ];
        if include_is_soc {
            values.push(&is_soc);
        }
        values.extend_from_slice(&[
            &price_category,
            &cafe.popularity_percentile,
            &cafe.quality_score,
            &cafe.distance_from_downtown,
            &location_zone,
            &cafe.flags.missing_location,
            &cafe.flags.no_rating,
            &cafe.flags.no_price,
            &cafe.flags.location_out_of_bounds,
            &cafe.flags.suspicious_price,
            &flag_count,
            &quality_tier,
        ]);
        stmt.execute(&values[..])?;
    }
    Ok(())
}

fn insert_completeness(tx: &Transaction<'_>, tables: &DerivedTables) -> Result<(), StoreError> {
    let mut stmt = tx.prepare(
        "INSERT INTO completeness_metrics \
         (field, total_records, complete_count, missing_count, complete_rate) \
         VALUES (?, ?, ?, ?, ?)",
    )?;
    for row in &tables.completeness_metrics {
        stmt.execute(rusqlite::params![
            row.field,
            row.total_records,
            row.complete_count,
            row.missing_count,
            row.complete_rate,
        ])?;
    }
    Ok(())
}

fn insert_quality_distribution(
    tx: &Transaction<'_>,
    tables: &DerivedTables,
) -> Result<(), StoreError> {
    let mut stmt = tx.prepare(
        "INSERT INTO quality_distribution (quality_tier, count, percentage) VALUES (?, ?, ?)",
    )?;
    for row in &tables.quality_distribution {
        stmt.execute(rusqlite::params![row.quality_tier, row.count, row.percentage])?;
    }
    Ok(())
}

fn insert_metadata(tx: &Transaction<'_>, tables: &DerivedTables) -> Result<(), StoreError> {
    let m = &tables.metadata;
    tx.execute(
        "INSERT INTO metadata \
         (run_id, ferry_date, ferry_version, sqlite_version, input_file, input_records, \
          output_file, output_records, validation_errors, validation_warnings, avg_completeness) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            m.run_id,
            m.ferry_date.to_rfc3339(),
            m.ferry_version,
            m.sqlite_version,
            m.input_file,
            m.input_records,
            m.output_file,
            m.output_records,
            m.validation_errors,
            m.validation_warnings,
            m.avg_completeness,
        ],
    )?;
    Ok(())
}
