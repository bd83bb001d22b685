//! Field standardization.
//!
//! Produces a normalized working copy of the raw table. The validator's
//! input is left untouched; completeness metrics are computed over the
//! original rows, not these.

use ci_common::RawCafe;

use crate::validate::ValidationReport;

/// Title-case a string the way the collected data was normalized: the
/// first letter after any non-alphabetic character is uppercased, every
/// other letter lowercased, so "whyte avenue" becomes "Whyte Avenue" and
/// "124 street" becomes "124 Street".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Standardize a validated raw table into a working copy.
///
/// - `neighborhood` is trimmed and title-cased
/// - `cafe_type` and `ownership` are trimmed and lower-cased
/// - ratings the validator flagged invalid become null
/// - negative review counts become null
pub fn standardize(cafes: &[RawCafe], report: &ValidationReport) -> Vec<RawCafe> {
    cafes
        .iter()
        .enumerate()
        .map(|(i, cafe)| {
            let mut out = cafe.clone();
            out.neighborhood = cafe
                .neighborhood
                .as_deref()
                .map(|n| title_case(n.trim()));
            out.cafe_type = cafe.cafe_type.as_deref().map(|t| t.trim().to_lowercase());
            out.ownership = cafe.ownership.as_deref().map(|o| o.trim().to_lowercase());
            if report.invalid_rating.get(i).copied().unwrap_or(false) {
                out.google_rating = None;
            }
            if cafe.review_count.map(|n| n < 0).unwrap_or(false) {
                out.review_count = None;
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use ci_config::FerryConfig;

    fn cafe(id: i64) -> RawCafe {
        RawCafe {
            cafe_id: Some(id),
            name: Some(format!("Cafe {id}")),
            neighborhood: Some("oliver".to_string()),
            cafe_type: Some("Specialty_Coffee".to_string()),
            ..RawCafe::default()
        }
    }

    fn standardized(cafes: Vec<RawCafe>) -> Vec<RawCafe> {
        let report = validate(&cafes, &FerryConfig::default()).unwrap();
        standardize(&cafes, &report)
    }

    // ── Casing ─────────────────────────────────────────────────────

    #[test]
    fn neighborhood_is_title_cased() {
        let out = standardized(vec![cafe(1)]);
        assert_eq!(out[0].neighborhood.as_deref(), Some("Oliver"));
    }

    #[test]
    fn multi_word_neighborhood_title_cases_each_word() {
        let mut c = cafe(1);
        c.neighborhood = Some("  whyte avenue ".to_string());
        let out = standardized(vec![c]);
        assert_eq!(out[0].neighborhood.as_deref(), Some("Whyte Avenue"));
    }

    #[test]
    fn digit_led_neighborhood_capitalizes_following_word() {
        let mut c = cafe(1);
        c.neighborhood = Some("124 street".to_string());
        let out = standardized(vec![c]);
        assert_eq!(out[0].neighborhood.as_deref(), Some("124 Street"));
    }

    #[test]
    fn shouty_neighborhood_is_normalized() {
        let mut c = cafe(1);
        c.neighborhood = Some("OLD STRATHCONA".to_string());
        let out = standardized(vec![c]);
        assert_eq!(out[0].neighborhood.as_deref(), Some("Old Strathcona"));
    }

    #[test]
    fn cafe_type_and_ownership_are_lower_cased() {
        let mut c = cafe(1);
        c.ownership = Some(" Independent ".to_string());
        let out = standardized(vec![c]);
        assert_eq!(out[0].cafe_type.as_deref(), Some("specialty_coffee"));
        assert_eq!(out[0].ownership.as_deref(), Some("independent"));
    }

    // ── Corrections ────────────────────────────────────────────────

    #[test]
    fn invalid_rating_becomes_null() {
        let mut c = cafe(1);
        c.google_rating = Some(6.0);
        let out = standardized(vec![c]);
        assert!(out[0].google_rating.is_none());
    }

    #[test]
    fn valid_rating_is_preserved() {
        let mut c = cafe(1);
        c.google_rating = Some(4.6);
        let out = standardized(vec![c]);
        assert_eq!(out[0].google_rating, Some(4.6));
    }

    #[test]
    fn negative_review_count_becomes_null() {
        let mut c = cafe(1);
        c.review_count = Some(-3);
        let out = standardized(vec![c]);
        assert!(out[0].review_count.is_none());
    }

    #[test]
    fn zero_review_count_is_preserved() {
        let mut c = cafe(1);
        c.review_count = Some(0);
        let out = standardized(vec![c]);
        assert_eq!(out[0].review_count, Some(0));
    }

    #[test]
    fn input_rows_are_not_mutated() {
        let cafes = vec![cafe(1)];
        let report = validate(&cafes, &FerryConfig::default()).unwrap();
        let _ = standardize(&cafes, &report);
        assert_eq!(cafes[0].neighborhood.as_deref(), Some("oliver"));
    }
}
