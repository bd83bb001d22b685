//! Aggregate quality metrics.
//!
//! Completeness is measured against the original raw rows (what was
//! actually collected), while the tier distribution summarizes the
//! enriched output.

use ci_common::{EnrichedCafe, QualityTier, RawCafe};
use ci_store::{FieldCompleteness, TierCount};

/// Per-field completeness over the raw table, sorted ascending by
/// complete rate. Ties keep the raw column order.
pub fn completeness_metrics(raw: &[RawCafe]) -> Vec<FieldCompleteness> {
    let total = raw.len() as i64;
    let mut rows: Vec<FieldCompleteness> = RawCafe::FIELDS
        .iter()
        .map(|field| {
            let complete = raw.iter().filter(|c| c.field_is_present(field)).count() as i64;
            FieldCompleteness {
                field: (*field).to_string(),
                total_records: total,
                complete_count: complete,
                missing_count: total - complete,
                complete_rate: if total == 0 {
                    0.0
                } else {
                    complete as f64 / total as f64
                },
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        a.complete_rate
            .partial_cmp(&b.complete_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// Mean complete rate across all raw fields, as a percentage.
pub fn mean_completeness(metrics: &[FieldCompleteness]) -> f64 {
    if metrics.is_empty() {
        return 0.0;
    }
    let sum: f64 = metrics.iter().map(|m| m.complete_rate).sum();
    sum / metrics.len() as f64 * 100.0
}

/// Fields whose complete rate falls below the given threshold.
pub fn low_completeness_fields(metrics: &[FieldCompleteness], threshold: f64) -> Vec<String> {
    metrics
        .iter()
        .filter(|m| m.complete_rate < threshold)
        .map(|m| m.field.clone())
        .collect()
}

/// Quality-tier distribution over the enriched table.
///
/// Every tier appears, zero counts included, ordered by descending count
/// with ties in tier order. Percentages are of the whole table, one
/// decimal place.
pub fn quality_distribution(enriched: &[EnrichedCafe]) -> Vec<TierCount> {
    let total = enriched.len();
    let mut rows: Vec<TierCount> = QualityTier::ALL
        .iter()
        .map(|tier| {
            let count = enriched
                .iter()
                .filter(|c| c.quality_tier == Some(*tier))
                .count() as i64;
            let percentage = if total == 0 {
                0.0
            } else {
                (count as f64 / total as f64 * 1000.0).round() / 10.0
            };
            TierCount {
                quality_tier: tier.as_str().to_string(),
                count,
                percentage,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}
