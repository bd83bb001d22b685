//! Raw-table validation.
//!
//! Two severities: fatal findings (missing required fields, duplicate
//! identities) abort the run before anything else happens; warning
//! findings are counted and recorded as per-row masks that drive the
//! later correction and flagging steps. The raw table itself is never
//! mutated here.

use std::collections::BTreeMap;

use ci_common::{Error, RawCafe, Result};
use ci_config::FerryConfig;
use tracing::{info, warn};

/// Fields that must be present on every raw record.
pub const REQUIRED_FIELDS: [&str; 4] = ["cafe_id", "name", "neighborhood", "cafe_type"];

/// Outcome of validating a raw table: warning counts and per-row masks.
///
/// Mask vectors are aligned with the input row order.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub records: usize,
    pub location_out_of_bounds: Vec<bool>,
    pub suspicious_price: Vec<bool>,
    pub invalid_rating: Vec<bool>,
    pub negative_review_count: Vec<bool>,
}

impl ValidationReport {
    pub fn location_warnings(&self) -> usize {
        self.location_out_of_bounds.iter().filter(|b| **b).count()
    }

    pub fn price_warnings(&self) -> usize {
        self.suspicious_price.iter().filter(|b| **b).count()
    }

    pub fn rating_warnings(&self) -> usize {
        self.invalid_rating.iter().filter(|b| **b).count()
    }

    pub fn review_count_warnings(&self) -> usize {
        self.negative_review_count.iter().filter(|b| **b).count()
    }

    /// Total warnings across every category.
    pub fn total_warnings(&self) -> usize {
        self.location_warnings()
            + self.price_warnings()
            + self.rating_warnings()
            + self.review_count_warnings()
    }
}

/// Validate the raw table.
///
/// Returns the warning report, or the first fatal finding as an error.
/// Fatal findings name the failed check and the offending rows so the
/// operator can fix the upstream data.
pub fn validate(cafes: &[RawCafe], config: &FerryConfig) -> Result<ValidationReport> {
    check_required_fields(cafes)?;
    check_unique_ids(cafes)?;

    let location_out_of_bounds: Vec<bool> = cafes
        .iter()
        .map(|c| match (c.latitude, c.longitude) {
            (Some(lat), Some(lng)) => !config.bounds.contains(lat, lng),
            _ => false,
        })
        .collect();

    let suspicious_price: Vec<bool> = cafes
        .iter()
        .map(|c| {
            c.avg_beverage_price
                .map(|p| !config.price_range.contains(p))
                .unwrap_or(false)
        })
        .collect();

    let invalid_rating: Vec<bool> = cafes
        .iter()
        .map(|c| {
            c.google_rating
                .map(|r| !(1.0..=5.0).contains(&r))
                .unwrap_or(false)
        })
        .collect();

    let negative_review_count: Vec<bool> = cafes
        .iter()
        .map(|c| c.review_count.map(|n| n < 0).unwrap_or(false))
        .collect();

    let report = ValidationReport {
        records: cafes.len(),
        location_out_of_bounds,
        suspicious_price,
        invalid_rating,
        negative_review_count,
    };

    if report.location_warnings() > 0 {
        warn!(
            records = report.location_warnings(),
            "coordinates outside expected bounds"
        );
    }
    if report.price_warnings() > 0 {
        warn!(
            records = report.price_warnings(),
            min = config.price_range.min,
            max = config.price_range.max,
            "prices outside typical range"
        );
    }
    if report.rating_warnings() > 0 {
        warn!(
            records = report.rating_warnings(),
            "invalid ratings, will be set to null"
        );
    }
    if report.review_count_warnings() > 0 {
        warn!(
            records = report.review_count_warnings(),
            "negative review counts, will be set to null"
        );
    }
    info!(
        records = cafes.len(),
        warnings = report.total_warnings(),
        "validation passed"
    );

    Ok(report)
}

fn check_required_fields(cafes: &[RawCafe]) -> Result<()> {
    let mut offending_rows = 0usize;
    let mut missing_fields: Vec<&str> = Vec::new();

    for cafe in cafes {
        let mut row_missing = false;
        for field in REQUIRED_FIELDS {
            if !cafe.field_is_present(field) {
                row_missing = true;
                if !missing_fields.contains(&field) {
                    missing_fields.push(field);
                }
            }
        }
        if row_missing {
            offending_rows += 1;
        }
    }

    if offending_rows > 0 {
        return Err(Error::MissingRequiredFields {
            rows: offending_rows,
            fields: missing_fields.join(", "),
        });
    }
    Ok(())
}

fn check_unique_ids(cafes: &[RawCafe]) -> Result<()> {
    let mut seen: BTreeMap<i64, usize> = BTreeMap::new();
    for cafe in cafes {
        if let Some(id) = cafe.cafe_id {
            *seen.entry(id).or_insert(0) += 1;
        }
    }

    let duplicated: Vec<(i64, usize)> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    if duplicated.is_empty() {
        return Ok(());
    }

    // Count rows beyond each id's first occurrence, the way a duplicated()
    // scan reports them.
    let count = duplicated.iter().map(|(_, n)| n - 1).sum();
    let ids = duplicated
        .iter()
        .map(|(id, _)| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::DuplicateCafeIds { count, ids })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_cafe(id: i64) -> RawCafe {
        RawCafe {
            cafe_id: Some(id),
            name: Some(format!("Cafe {id}")),
            neighborhood: Some("Oliver".to_string()),
            cafe_type: Some("coffee_shop".to_string()),
            ..RawCafe::default()
        }
    }

    fn config() -> FerryConfig {
        FerryConfig::default()
    }

    // ── Fatal checks ───────────────────────────────────────────────

    #[test]
    fn clean_table_passes() {
        let cafes = vec![complete_cafe(1), complete_cafe(2)];
        let report = validate(&cafes, &config()).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.total_warnings(), 0);
    }

    #[test]
    fn missing_name_is_fatal() {
        let mut cafe = complete_cafe(1);
        cafe.name = None;
        let err = validate(&[cafe], &config()).unwrap_err();
        match err {
            Error::MissingRequiredFields { rows, fields } => {
                assert_eq!(rows, 1);
                assert!(fields.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_neighborhood_and_type_both_named() {
        let mut a = complete_cafe(1);
        a.neighborhood = None;
        let mut b = complete_cafe(2);
        b.cafe_type = None;
        let err = validate(&[a, b], &config()).unwrap_err();
        match err {
            Error::MissingRequiredFields { rows, fields } => {
                assert_eq!(rows, 2);
                assert!(fields.contains("neighborhood"));
                assert!(fields.contains("cafe_type"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ids_are_fatal_and_named() {
        let cafes = vec![complete_cafe(1), complete_cafe(2), complete_cafe(2)];
        let err = validate(&cafes, &config()).unwrap_err();
        match err {
            Error::DuplicateCafeIds { count, ids } => {
                assert_eq!(count, 1);
                assert_eq!(ids, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn triple_duplicate_counts_two_extra_rows() {
        let cafes = vec![complete_cafe(7), complete_cafe(7), complete_cafe(7)];
        let err = validate(&cafes, &config()).unwrap_err();
        match err {
            Error::DuplicateCafeIds { count, .. } => assert_eq!(count, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    // ── Warning checks ─────────────────────────────────────────────

    #[test]
    fn out_of_bounds_coordinates_warn_but_pass() {
        let mut cafe = complete_cafe(1);
        cafe.latitude = Some(51.0447);
        cafe.longitude = Some(-114.0719);
        let report = validate(&[cafe], &config()).unwrap();
        assert_eq!(report.location_warnings(), 1);
        assert!(report.location_out_of_bounds[0]);
    }

    #[test]
    fn absent_coordinates_do_not_warn() {
        let report = validate(&[complete_cafe(1)], &config()).unwrap();
        assert_eq!(report.location_warnings(), 0);
    }

    #[test]
    fn in_bounds_coordinates_do_not_warn() {
        let mut cafe = complete_cafe(1);
        cafe.latitude = Some(53.5444);
        cafe.longitude = Some(-113.4909);
        let report = validate(&[cafe], &config()).unwrap();
        assert_eq!(report.location_warnings(), 0);
    }

    #[test]
    fn implausible_price_warns() {
        let mut cheap = complete_cafe(1);
        cheap.avg_beverage_price = Some(1.25);
        let mut steep = complete_cafe(2);
        steep.avg_beverage_price = Some(14.0);
        let report = validate(&[cheap, steep], &config()).unwrap();
        assert_eq!(report.price_warnings(), 2);
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let mut a = complete_cafe(1);
        a.avg_beverage_price = Some(2.0);
        let mut b = complete_cafe(2);
        b.avg_beverage_price = Some(10.0);
        let report = validate(&[a, b], &config()).unwrap();
        assert_eq!(report.price_warnings(), 0);
    }

    #[test]
    fn invalid_rating_warns() {
        let mut cafe = complete_cafe(1);
        cafe.google_rating = Some(6.0);
        let report = validate(&[cafe], &config()).unwrap();
        assert_eq!(report.rating_warnings(), 1);
        assert!(report.invalid_rating[0]);
    }

    #[test]
    fn boundary_ratings_are_valid() {
        let mut low = complete_cafe(1);
        low.google_rating = Some(1.0);
        let mut high = complete_cafe(2);
        high.google_rating = Some(5.0);
        let report = validate(&[low, high], &config()).unwrap();
        assert_eq!(report.rating_warnings(), 0);
    }

    #[test]
    fn negative_review_count_warns() {
        let mut cafe = complete_cafe(1);
        cafe.review_count = Some(-5);
        let report = validate(&[cafe], &config()).unwrap();
        assert_eq!(report.review_count_warnings(), 1);
        assert_eq!(report.total_warnings(), 1);
    }

    #[test]
    fn warnings_accumulate_across_categories() {
        let mut cafe = complete_cafe(1);
        cafe.latitude = Some(40.0);
        cafe.longitude = Some(-100.0);
        cafe.avg_beverage_price = Some(25.0);
        cafe.google_rating = Some(0.5);
        cafe.review_count = Some(-1);
        let report = validate(&[cafe], &config()).unwrap();
        assert_eq!(report.total_warnings(), 4);
    }
}
