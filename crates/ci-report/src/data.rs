//! Derived-store queries and small aggregation helpers for the charts.

use std::collections::BTreeMap;
use std::path::Path;

use ci_store::open_readonly;
use rusqlite::Connection;

use crate::ReportError;

/// The columns the chart families consume from `cafes_complete`.
#[derive(Debug, Clone)]
pub struct CafeRow {
    pub cafe_id: i64,
    pub name: String,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cafe_type: Option<String>,
    pub avg_beverage_price: Option<f64>,
    pub google_rating: Option<f64>,
    pub review_count: Option<i64>,
    pub is_soc: bool,
    pub price_category: Option<String>,
    pub location_zone: Option<String>,
    pub quality_score: Option<f64>,
}

/// Load `cafes_complete` from a derived store.
pub fn load_cafes(path: &Path) -> Result<Vec<CafeRow>, ReportError> {
    let conn = open_readonly(path)?;
    read_cafes(&conn)
}

fn read_cafes(conn: &Connection) -> Result<Vec<CafeRow>, ReportError> {
    let mut stmt = conn.prepare(
        "SELECT cafe_id, name, neighborhood, latitude, longitude, cafe_type, \
         avg_beverage_price, google_rating, review_count, is_soc, price_category, \
         location_zone, quality_score \
         FROM cafes_complete ORDER BY cafe_id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CafeRow {
                cafe_id: row.get(0)?,
                name: row.get(1)?,
                neighborhood: row.get(2)?,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                cafe_type: row.get(5)?,
                avg_beverage_price: row.get(6)?,
                google_rating: row.get(7)?,
                review_count: row.get(8)?,
                is_soc: row.get(9)?,
                price_category: row.get(10)?,
                location_zone: row.get(11)?,
                quality_score: row.get(12)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Downtown reference recorded on the map chart.
pub const DOWNTOWN_REF: (f64, f64) = (53.5444, -113.4909);

/// Count rows per key, sorted ascending by count (ties alphabetical).
pub fn counts_sorted_ascending<F>(cafes: &[CafeRow], key: F) -> Vec<(String, usize)>
where
    F: Fn(&CafeRow) -> Option<String>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cafe in cafes {
        if let Some(k) = key(cafe) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Count rows per label in a fixed label order, zero counts included.
pub fn counts_in_order<F>(cafes: &[CafeRow], labels: &[&str], key: F) -> Vec<(String, usize)>
where
    F: Fn(&CafeRow) -> Option<String>,
{
    labels
        .iter()
        .map(|label| {
            let count = cafes
                .iter()
                .filter(|c| key(c).as_deref() == Some(*label))
                .count();
            ((*label).to_string(), count)
        })
        .collect()
}

/// Split into (SOC, competitor) rows.
pub fn split_by_business(cafes: &[CafeRow]) -> (Vec<&CafeRow>, Vec<&CafeRow>) {
    cafes.iter().partition(|c| c.is_soc)
}

/// Mean of the non-null values a selector extracts.
pub fn mean_of<F>(cafes: &[&CafeRow], select: F) -> Option<f64>
where
    F: Fn(&CafeRow) -> Option<f64>,
{
    let values: Vec<f64> = cafes.iter().filter_map(|c| select(c)).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Bucket values into fixed-width histogram bins over [lo, hi).
pub fn histogram(values: &[f64], lo: f64, hi: f64, buckets: usize) -> Vec<usize> {
    let mut counts = vec![0usize; buckets];
    if hi <= lo || buckets == 0 {
        return counts;
    }
    let width = (hi - lo) / buckets as f64;
    for v in values {
        if *v < lo || *v >= hi {
            continue;
        }
        let idx = ((v - lo) / width) as usize;
        counts[idx.min(buckets - 1)] += 1;
    }
    counts
}

/// Neighbourhoods that contain at least one SOC location.
pub fn soc_neighborhoods(cafes: &[CafeRow]) -> Vec<String> {
    let mut out: Vec<String> = cafes
        .iter()
        .filter(|c| c.is_soc)
        .filter_map(|c| c.neighborhood.clone())
        .collect();
    out.sort();
    out.dedup();
    out
}
