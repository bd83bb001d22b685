//! SOC / competitor partitioning.

use ci_common::EnrichedCafe;
use tracing::info;

/// Split the enriched table into (SOC locations, competitors).
///
/// Partitioning is on the `business_type` attribute assigned during
/// enrichment; row order within each subset follows the input.
pub fn partition(cafes: &[EnrichedCafe]) -> (Vec<EnrichedCafe>, Vec<EnrichedCafe>) {
    let (soc, competitors): (Vec<EnrichedCafe>, Vec<EnrichedCafe>) =
        cafes.iter().cloned().partition(|c| c.is_soc());
    info!(
        soc = soc.len(),
        competitors = competitors.len(),
        "analysis tables created"
    );
    (soc, competitors)
}
