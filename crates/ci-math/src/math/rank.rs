//! Percentile ranks with average tie handling.
//!
//! Tied values share the mean of the ranks they would occupy, and the
//! percentile divides by the number of non-null values. Nulls stay null
//! and do not count toward the denominator.

/// Compute the percentile rank of each value in `[0, 1]`.
///
/// Output is aligned with the input: `None` in, `None` out. NaN values are
/// treated as null.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match v {
            Some(x) if !x.is_nan() => Some((i, *x)),
            _ => None,
        })
        .collect();

    let n = present.len();
    let mut out = vec![None; values.len()];
    if n == 0 {
        return out;
    }

    present.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && present[end + 1].1 == present[start].1 {
            end += 1;
        }
        // 1-based ranks start+1 ..= end+1, averaged across the tie run.
        let avg_rank = (start + end) as f64 / 2.0 + 1.0;
        let pct = avg_rank / n as f64;
        for &(orig_idx, _) in &present[start..=end] {
            out[orig_idx] = Some(pct);
        }
        start = end + 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn distinct_values_rank_evenly() {
        let ranks = percentile_ranks(&[Some(10.0), Some(30.0), Some(20.0), Some(40.0)]);
        assert!(approx_eq(ranks[0].unwrap(), 0.25));
        assert!(approx_eq(ranks[1].unwrap(), 0.75));
        assert!(approx_eq(ranks[2].unwrap(), 0.5));
        assert!(approx_eq(ranks[3].unwrap(), 1.0));
    }

    #[test]
    fn ties_share_the_average_rank() {
        // Ranks 1, 2.5, 2.5, 4 over n=4.
        let ranks = percentile_ranks(&[Some(10.0), Some(20.0), Some(20.0), Some(30.0)]);
        assert!(approx_eq(ranks[0].unwrap(), 0.25));
        assert!(approx_eq(ranks[1].unwrap(), 0.625));
        assert!(approx_eq(ranks[2].unwrap(), 0.625));
        assert!(approx_eq(ranks[3].unwrap(), 1.0));
    }

    #[test]
    fn nulls_stay_null_and_shrink_denominator() {
        let ranks = percentile_ranks(&[Some(5.0), None, Some(15.0)]);
        assert!(approx_eq(ranks[0].unwrap(), 0.5));
        assert!(ranks[1].is_none());
        assert!(approx_eq(ranks[2].unwrap(), 1.0));
    }

    #[test]
    fn nan_is_treated_as_null() {
        let ranks = percentile_ranks(&[Some(f64::NAN), Some(1.0)]);
        assert!(ranks[0].is_none());
        assert!(approx_eq(ranks[1].unwrap(), 1.0));
    }

    #[test]
    fn all_null_input_yields_all_null() {
        let ranks = percentile_ranks(&[None, None]);
        assert!(ranks.iter().all(Option::is_none));
    }

    #[test]
    fn single_value_ranks_at_one() {
        let ranks = percentile_ranks(&[Some(42.0)]);
        assert!(approx_eq(ranks[0].unwrap(), 1.0));
    }

    #[test]
    fn all_tied_values_rank_at_midpoint_plus_half() {
        // Ranks all (1+2+3)/3 = 2 over n=3 → 2/3.
        let ranks = percentile_ranks(&[Some(7.0), Some(7.0), Some(7.0)]);
        for r in ranks {
            assert!(approx_eq(r.unwrap(), 2.0 / 3.0));
        }
    }

    proptest! {
        #[test]
        fn ranks_are_within_unit_interval(vals in proptest::collection::vec(0.0f64..1000.0, 1..50)) {
            let input: Vec<Option<f64>> = vals.into_iter().map(Some).collect();
            for r in percentile_ranks(&input).into_iter().flatten() {
                prop_assert!(r > 0.0 && r <= 1.0);
            }
        }

        #[test]
        fn max_value_ranks_at_one(vals in proptest::collection::vec(0.0f64..1000.0, 1..50)) {
            let input: Vec<Option<f64>> = vals.iter().copied().map(Some).collect();
            let ranks = percentile_ranks(&input);
            let max = vals.iter().cloned().fold(f64::MIN, f64::max);
            for (v, r) in vals.iter().zip(ranks.iter()) {
                if *v == max {
                    prop_assert!((r.unwrap() - 1.0).abs() < 1e-9);
                }
            }
        }
    }
}
