//! Ferry configuration types.
//!
//! Every analytic constant the ferry bakes into derived fields lives here:
//! the geographic sanity box, the downtown reference point, the plausible
//! price range, and the three bin-edge lists. All of it is adjustable from
//! a JSON file; the embedded defaults match the values the derived store
//! has always been produced with.

use ci_math::Bins;
use serde::{Deserialize, Serialize};

use crate::validate::ConfigError;

/// Complete ferry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FerryConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Geographic sanity box for collected coordinates.
    pub bounds: GeoBounds,

    /// Reference point distances are measured from.
    pub downtown: GeoPoint,

    /// Plausible beverage-price range; prices outside are flagged.
    pub price_range: PriceRange,

    /// Price-category bin edges (top bin open-ended).
    pub price_bin_edges: Vec<f64>,

    /// Location-zone bin edges in kilometres (top bin open-ended).
    pub zone_bin_edges: Vec<f64>,

    /// Quality-tier bin edges over the flag count (top bin open-ended).
    pub tier_bin_edges: Vec<f64>,
}

/// Min/max latitude and longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    /// Whether a point lies inside the box (inclusive).
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lng >= self.lng_min && lng <= self.lng_max
    }
}

/// A single (lat, lng) point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Inclusive plausible price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Whether a price lies inside the plausible range (inclusive).
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// The three binnings the enricher derives categorical fields with.
#[derive(Debug, Clone)]
pub struct FerryBins {
    pub price: Bins,
    pub zone: Bins,
    pub tier: Bins,
}

impl FerryConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic validation beyond what serde enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.lat_min >= self.bounds.lat_max {
            return Err(ConfigError::Semantic(format!(
                "lat_min {} must be below lat_max {}",
                self.bounds.lat_min, self.bounds.lat_max
            )));
        }
        if self.bounds.lng_min >= self.bounds.lng_max {
            return Err(ConfigError::Semantic(format!(
                "lng_min {} must be below lng_max {}",
                self.bounds.lng_min, self.bounds.lng_max
            )));
        }
        if self.price_range.min >= self.price_range.max {
            return Err(ConfigError::Semantic(format!(
                "price range min {} must be below max {}",
                self.price_range.min, self.price_range.max
            )));
        }
        for (name, edges) in [
            ("price_bin_edges", &self.price_bin_edges),
            ("zone_bin_edges", &self.zone_bin_edges),
            ("tier_bin_edges", &self.tier_bin_edges),
        ] {
            Bins::new(edges).map_err(|e| ConfigError::Semantic(format!("{}: {}", name, e)))?;
        }
        Ok(())
    }

    /// Build the three binnings. Call after `validate` has passed.
    pub fn bins(&self) -> Result<FerryBins, ConfigError> {
        let build = |name: &str, edges: &[f64]| {
            Bins::new(edges).map_err(|e| ConfigError::Semantic(format!("{}: {}", name, e)))
        };
        Ok(FerryBins {
            price: build("price_bin_edges", &self.price_bin_edges)?,
            zone: build("zone_bin_edges", &self.zone_bin_edges)?,
            tier: build("tier_bin_edges", &self.tier_bin_edges)?,
        })
    }
}

/// Embedded default configuration JSON for fallback.
const DEFAULT_CONFIG_JSON: &str = include_str!("schemas/ferry.default.json");

impl Default for FerryConfig {
    fn default() -> Self {
        // Parsing the compile-time default can only fail if the embedded
        // JSON itself is broken, which the test suite pins down.
        Self::parse_json(DEFAULT_CONFIG_JSON).expect("embedded default ferry config is invalid")
    }
}
