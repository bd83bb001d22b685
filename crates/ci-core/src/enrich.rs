//! Derived-field computation.
//!
//! Pure: takes the standardized table plus the validator's warning masks
//! and produces enriched records without touching either input. Every
//! categorical assignment goes through explicit `Bins` comparisons so the
//! boundary rule (upper-inclusive, open top) is in one place.

use ci_common::{
    BusinessType, EnrichedCafe, LocationZone, PriceCategory, QualityFlags, QualityTier, RawCafe,
};
use ci_config::{FerryBins, FerryConfig};
use ci_math::{percentile_ranks, planar_distance_km};
use tracing::debug;

use crate::validate::ValidationReport;

/// Enrich every standardized record with the derived analytic fields.
///
/// `cafes` must be the standardized working copy; the masks in `report`
/// are aligned with it by row order.
pub fn enrich(
    cafes: &[RawCafe],
    report: &ValidationReport,
    config: &FerryConfig,
    bins: &FerryBins,
) -> Vec<EnrichedCafe> {
    // Popularity is ranked across the entire table, not per subset.
    let review_counts: Vec<Option<f64>> = cafes
        .iter()
        .map(|c| c.review_count.map(|n| n as f64))
        .collect();
    let percentiles = percentile_ranks(&review_counts);

    let enriched: Vec<EnrichedCafe> = cafes
        .iter()
        .enumerate()
        .map(|(i, cafe)| {
            let business_type = cafe
                .name
                .as_deref()
                .map(BusinessType::from_name)
                .unwrap_or(BusinessType::Competitor);

            let price_category = bins
                .price
                .assign_opt(cafe.avg_beverage_price)
                .and_then(PriceCategory::from_bin_index);

            let quality_score = quality_score(cafe.google_rating, cafe.review_count);

            let distance_from_downtown = match (cafe.latitude, cafe.longitude) {
                (Some(lat), Some(lng)) => Some(planar_distance_km(
                    lat,
                    lng,
                    config.downtown.lat,
                    config.downtown.lng,
                )),
                _ => None,
            };

            let location_zone = bins
                .zone
                .assign_opt(distance_from_downtown)
                .and_then(LocationZone::from_bin_index);

            let flags = QualityFlags {
                missing_location: cafe.latitude.is_none() || cafe.longitude.is_none(),
                no_rating: cafe.google_rating.is_none(),
                no_price: cafe.avg_beverage_price.is_none(),
                location_out_of_bounds: report
                    .location_out_of_bounds
                    .get(i)
                    .copied()
                    .unwrap_or(false),
                suspicious_price: report.suspicious_price.get(i).copied().unwrap_or(false),
            };

            let quality_tier = bins
                .tier
                .assign(f64::from(flags.count()))
                .and_then(QualityTier::from_bin_index);

            EnrichedCafe {
                record: cafe.clone(),
                business_type,
                price_category,
                popularity_percentile: percentiles[i],
                quality_score,
                distance_from_downtown,
                location_zone,
                flags,
                quality_tier,
            }
        })
        .collect();

    debug!(records = enriched.len(), "derived fields added");
    enriched
}

/// `google_rating × ln(review_count + 1)`; null when either input is null.
///
/// Negative counts never reach here post-standardization, but a count of
/// -1 would put the log at negative infinity, so it is rejected outright.
fn quality_score(rating: Option<f64>, review_count: Option<i64>) -> Option<f64> {
    match (rating, review_count) {
        (Some(r), Some(n)) if n >= 0 => Some(r * ((n as f64) + 1.0).ln()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standardize::standardize;
    use crate::validate::validate;

    fn cafe(id: i64, name: &str) -> RawCafe {
        RawCafe {
            cafe_id: Some(id),
            name: Some(name.to_string()),
            neighborhood: Some("Oliver".to_string()),
            cafe_type: Some("specialty_coffee".to_string()),
            ..RawCafe::default()
        }
    }

    fn enrich_all(cafes: Vec<RawCafe>) -> Vec<EnrichedCafe> {
        let config = FerryConfig::default();
        let report = validate(&cafes, &config).unwrap();
        let standardized = standardize(&cafes, &report);
        let bins = config.bins().unwrap();
        enrich(&standardized, &report, &config, &bins)
    }

    // ── Business type ──────────────────────────────────────────────

    #[test]
    fn soc_is_assigned_from_name_once() {
        let out = enrich_all(vec![
            cafe(1, "Square One Coffee - Oliver"),
            cafe(2, "Bean Central"),
        ]);
        assert_eq!(out[0].business_type, BusinessType::Soc);
        assert_eq!(out[1].business_type, BusinessType::Competitor);
    }

    // ── Price category ─────────────────────────────────────────────

    #[test]
    fn price_bins_follow_boundaries() {
        let cases = [
            (3.49, PriceCategory::Budget),
            (3.50, PriceCategory::Budget),
            (3.51, PriceCategory::Moderate),
            (5.00, PriceCategory::Moderate),
            (5.25, PriceCategory::Premium),
            (6.50, PriceCategory::Premium),
            (6.51, PriceCategory::Luxury),
        ];
        for (price, expected) in cases {
            let mut c = cafe(1, "Bean Central");
            c.avg_beverage_price = Some(price);
            let out = enrich_all(vec![c]);
            assert_eq!(out[0].price_category, Some(expected), "price {price}");
        }
    }

    #[test]
    fn null_price_means_null_category() {
        let out = enrich_all(vec![cafe(1, "Bean Central")]);
        assert!(out[0].price_category.is_none());
    }

    // ── Quality score ──────────────────────────────────────────────

    #[test]
    fn quality_score_is_rating_times_log_reviews() {
        let mut c = cafe(1, "Square One Coffee - Oliver");
        c.google_rating = Some(4.6);
        c.review_count = Some(300);
        let out = enrich_all(vec![c]);
        let expected = 4.6 * 301f64.ln();
        assert!((out[0].quality_score.unwrap() - expected).abs() < 1e-9);
        assert!((out[0].quality_score.unwrap() - 26.3).abs() < 0.1);
    }

    #[test]
    fn quality_score_null_when_either_input_null() {
        let mut rated = cafe(1, "A");
        rated.google_rating = Some(4.0);
        let mut reviewed = cafe(2, "B");
        reviewed.review_count = Some(50);
        let out = enrich_all(vec![rated, reviewed]);
        assert!(out[0].quality_score.is_none());
        assert!(out[1].quality_score.is_none());
    }

    #[test]
    fn quality_score_zero_reviews_is_zero() {
        let mut c = cafe(1, "A");
        c.google_rating = Some(4.0);
        c.review_count = Some(0);
        let out = enrich_all(vec![c]);
        assert_eq!(out[0].quality_score, Some(0.0));
    }

    #[test]
    fn quality_score_guards_negative_count() {
        assert!(quality_score(Some(4.0), Some(-1)).is_none());
    }

    #[test]
    fn invalid_rating_yields_null_score_and_no_rating_flag() {
        let mut c = cafe(1, "A");
        c.google_rating = Some(6.0);
        c.review_count = Some(100);
        let out = enrich_all(vec![c]);
        assert!(out[0].quality_score.is_none());
        assert!(out[0].flags.no_rating);
    }

    // ── Distance and zone ──────────────────────────────────────────

    #[test]
    fn distance_uses_planar_formula() {
        let mut c = cafe(1, "A");
        c.latitude = Some(53.54);
        c.longitude = Some(-113.49);
        let out = enrich_all(vec![c]);
        let expected = ((53.54f64 - 53.5444).powi(2) + (-113.49f64 + 113.4909).powi(2)).sqrt() * 111.0;
        assert!((out[0].distance_from_downtown.unwrap() - expected).abs() < 1e-9);
        assert_eq!(out[0].location_zone, Some(LocationZone::Core));
    }

    #[test]
    fn zone_bins_follow_boundaries() {
        // 0.05 degrees of latitude is 5.55 km: outer ring.
        let mut c = cafe(1, "A");
        c.latitude = Some(53.5444 + 0.05);
        c.longitude = Some(-113.4909);
        let out = enrich_all(vec![c]);
        assert_eq!(out[0].location_zone, Some(LocationZone::Outer));
    }

    #[test]
    fn missing_coordinates_mean_null_distance_and_zone() {
        let out = enrich_all(vec![cafe(1, "A")]);
        assert!(out[0].distance_from_downtown.is_none());
        assert!(out[0].location_zone.is_none());
        assert!(out[0].flags.missing_location);
    }

    // ── Percentile ─────────────────────────────────────────────────

    #[test]
    fn percentile_spans_whole_table() {
        let mut a = cafe(1, "A");
        a.review_count = Some(10);
        let mut b = cafe(2, "Square One Coffee");
        b.review_count = Some(100);
        let mut c = cafe(3, "C");
        c.review_count = Some(50);
        let out = enrich_all(vec![a, b, c]);
        assert!((out[0].popularity_percentile.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((out[1].popularity_percentile.unwrap() - 1.0).abs() < 1e-12);
        assert!((out[2].popularity_percentile.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn nulled_review_count_has_null_percentile() {
        let mut a = cafe(1, "A");
        a.review_count = Some(-2);
        let mut b = cafe(2, "B");
        b.review_count = Some(5);
        let out = enrich_all(vec![a, b]);
        assert!(out[0].popularity_percentile.is_none());
        assert!((out[1].popularity_percentile.unwrap() - 1.0).abs() < 1e-12);
    }

    // ── Flags and tier ─────────────────────────────────────────────

    #[test]
    fn fully_populated_row_is_excellent() {
        let mut c = cafe(1, "Square One Coffee - Oliver");
        c.latitude = Some(53.54);
        c.longitude = Some(-113.49);
        c.avg_beverage_price = Some(5.25);
        c.google_rating = Some(4.6);
        c.review_count = Some(300);
        let out = enrich_all(vec![c]);
        assert_eq!(out[0].quality_flag_count(), 0);
        assert_eq!(out[0].quality_tier, Some(QualityTier::Excellent));
        assert_eq!(out[0].price_category, Some(PriceCategory::Premium));
    }

    #[test]
    fn tier_tracks_flag_count() {
        // Missing everything optional: location, rating, price all flagged.
        let out = enrich_all(vec![cafe(1, "A")]);
        assert_eq!(out[0].quality_flag_count(), 3);
        assert_eq!(out[0].quality_tier, Some(QualityTier::Poor));
    }

    #[test]
    fn missing_review_count_carries_no_flag() {
        let mut c = cafe(1, "A");
        c.latitude = Some(53.54);
        c.longitude = Some(-113.49);
        c.avg_beverage_price = Some(4.0);
        c.google_rating = Some(4.0);
        let out = enrich_all(vec![c]);
        assert_eq!(out[0].quality_flag_count(), 0);
        assert_eq!(out[0].quality_tier, Some(QualityTier::Excellent));
    }

    #[test]
    fn single_flag_lands_in_good() {
        // Everything present except coordinates.
        let mut c = cafe(2, "B");
        c.avg_beverage_price = Some(4.0);
        c.google_rating = Some(4.0);
        c.review_count = Some(10);
        let out = enrich_all(vec![c]);
        assert_eq!(out[0].quality_flag_count(), 1);
        assert_eq!(out[0].quality_tier, Some(QualityTier::Good));
    }

    #[test]
    fn two_flags_land_in_acceptable() {
        // Coordinates and price missing, reputation present.
        let mut c = cafe(3, "C");
        c.google_rating = Some(4.0);
        c.review_count = Some(10);
        let out = enrich_all(vec![c]);
        assert_eq!(out[0].quality_flag_count(), 2);
        assert_eq!(out[0].quality_tier, Some(QualityTier::Acceptable));
    }

    #[test]
    fn out_of_bounds_location_sets_flag_without_dropping_row() {
        let mut c = cafe(1, "A");
        c.latitude = Some(51.0);
        c.longitude = Some(-114.0);
        c.avg_beverage_price = Some(4.0);
        c.google_rating = Some(4.0);
        c.review_count = Some(10);
        let out = enrich_all(vec![c]);
        assert!(out[0].flags.location_out_of_bounds);
        assert!(!out[0].flags.missing_location);
        assert_eq!(out[0].quality_flag_count(), 1);
        // Distance is still computed from the out-of-bounds point.
        assert!(out[0].distance_from_downtown.is_some());
    }

    #[test]
    fn suspicious_price_still_bins() {
        let mut c = cafe(1, "A");
        c.avg_beverage_price = Some(14.0);
        let out = enrich_all(vec![c]);
        assert!(out[0].flags.suspicious_price);
        assert_eq!(out[0].price_category, Some(PriceCategory::Luxury));
    }
}
