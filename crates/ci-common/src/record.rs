//! Raw and enriched cafe record types.
//!
//! `RawCafe` mirrors the raw `cafes` table as collected: every column is
//! optional so the validator can classify nullness instead of failing at
//! read time. `EnrichedCafe` is a standardized record plus the derived
//! analytic fields.

use serde::{Deserialize, Serialize};

/// One row of the raw `cafes` table, as collected and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCafe {
    pub cafe_id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub cafe_type: Option<String>,
    pub ownership: Option<String>,
    pub avg_beverage_price: Option<f64>,
    pub has_food: Option<String>,
    pub has_wifi: Option<String>,
    pub seating_capacity: Option<i64>,
    pub ambiance: Option<String>,
    pub parking_availability: Option<String>,
    pub hours_weekday: Option<String>,
    pub hours_weekend: Option<String>,
    pub date_opened: Option<String>,
    pub instagram_handle: Option<String>,
    pub google_rating: Option<f64>,
    pub review_count: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RawCafe {
    /// Column names of the raw table, in collection order.
    ///
    /// Completeness metrics are reported per raw field, so this list is the
    /// authoritative field inventory for the raw schema.
    pub const FIELDS: [&'static str; 24] = [
        "cafe_id",
        "name",
        "address",
        "neighborhood",
        "latitude",
        "longitude",
        "phone",
        "website",
        "cafe_type",
        "ownership",
        "avg_beverage_price",
        "has_food",
        "has_wifi",
        "seating_capacity",
        "ambiance",
        "parking_availability",
        "hours_weekday",
        "hours_weekend",
        "date_opened",
        "instagram_handle",
        "google_rating",
        "review_count",
        "created_at",
        "updated_at",
    ];

    /// Whether the named field holds a value on this record.
    ///
    /// Unknown field names report as absent.
    pub fn field_is_present(&self, field: &str) -> bool {
        match field {
            "cafe_id" => self.cafe_id.is_some(),
            "name" => self.name.is_some(),
            "address" => self.address.is_some(),
            "neighborhood" => self.neighborhood.is_some(),
            "latitude" => self.latitude.is_some(),
            "longitude" => self.longitude.is_some(),
            "phone" => self.phone.is_some(),
            "website" => self.website.is_some(),
            "cafe_type" => self.cafe_type.is_some(),
            "ownership" => self.ownership.is_some(),
            "avg_beverage_price" => self.avg_beverage_price.is_some(),
            "has_food" => self.has_food.is_some(),
            "has_wifi" => self.has_wifi.is_some(),
            "seating_capacity" => self.seating_capacity.is_some(),
            "ambiance" => self.ambiance.is_some(),
            "parking_availability" => self.parking_availability.is_some(),
            "hours_weekday" => self.hours_weekday.is_some(),
            "hours_weekend" => self.hours_weekend.is_some(),
            "date_opened" => self.date_opened.is_some(),
            "instagram_handle" => self.instagram_handle.is_some(),
            "google_rating" => self.google_rating.is_some(),
            "review_count" => self.review_count.is_some(),
            "created_at" => self.created_at.is_some(),
            "updated_at" => self.updated_at.is_some(),
            _ => false,
        }
    }
}

/// Whether a record belongs to the subject business or a competitor.
///
/// Assigned exactly once during enrichment from the case-insensitive
/// "square one" name match; every later consumer partitions on this
/// attribute instead of re-deriving the string match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Soc,
    Competitor,
}

impl BusinessType {
    /// Classify a cafe name. The matching rule is part of the data contract.
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().contains("square one") {
            BusinessType::Soc
        } else {
            BusinessType::Competitor
        }
    }

    pub fn is_soc(self) -> bool {
        self == BusinessType::Soc
    }
}

/// Price band derived from `avg_beverage_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Budget,
    Moderate,
    Premium,
    Luxury,
}

impl PriceCategory {
    /// All categories in bin order (lowest band first).
    pub const ALL: [PriceCategory; 4] = [
        PriceCategory::Budget,
        PriceCategory::Moderate,
        PriceCategory::Premium,
        PriceCategory::Luxury,
    ];

    /// The label string written to the derived store.
    pub fn as_str(self) -> &'static str {
        match self {
            PriceCategory::Budget => "budget",
            PriceCategory::Moderate => "moderate",
            PriceCategory::Premium => "premium",
            PriceCategory::Luxury => "luxury",
        }
    }

    pub fn from_bin_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Distance band derived from `distance_from_downtown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationZone {
    Core,
    Inner,
    Outer,
    Peripheral,
}

impl LocationZone {
    /// All zones in bin order (closest to downtown first).
    pub const ALL: [LocationZone; 4] = [
        LocationZone::Core,
        LocationZone::Inner,
        LocationZone::Outer,
        LocationZone::Peripheral,
    ];

    /// The label string written to the derived store.
    pub fn as_str(self) -> &'static str {
        match self {
            LocationZone::Core => "core",
            LocationZone::Inner => "inner",
            LocationZone::Outer => "outer",
            LocationZone::Peripheral => "peripheral",
        }
    }

    pub fn from_bin_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Coarse data-quality bucket derived from the flag count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl QualityTier {
    /// All tiers in bin order (fewest flags first).
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Excellent,
        QualityTier::Good,
        QualityTier::Acceptable,
        QualityTier::Poor,
    ];

    /// The label string written to the derived store.
    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Excellent => "excellent",
            QualityTier::Good => "good",
            QualityTier::Acceptable => "acceptable",
            QualityTier::Poor => "poor",
        }
    }

    pub fn from_bin_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Per-record data-quality flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub missing_location: bool,
    pub no_rating: bool,
    pub no_price: bool,
    pub location_out_of_bounds: bool,
    pub suspicious_price: bool,
}

impl QualityFlags {
    /// Number of flags tripped, 0 through 5.
    pub fn count(&self) -> u32 {
        u32::from(self.missing_location)
            + u32::from(self.no_rating)
            + u32::from(self.no_price)
            + u32::from(self.location_out_of_bounds)
            + u32::from(self.suspicious_price)
    }
}

/// A standardized cafe record plus every derived analytic field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCafe {
    /// Standardized copy of the raw record.
    pub record: RawCafe,
    pub business_type: BusinessType,
    pub price_category: Option<PriceCategory>,
    pub popularity_percentile: Option<f64>,
    pub quality_score: Option<f64>,
    pub distance_from_downtown: Option<f64>,
    pub location_zone: Option<LocationZone>,
    pub flags: QualityFlags,
    pub quality_tier: Option<QualityTier>,
}

impl EnrichedCafe {
    pub fn quality_flag_count(&self) -> u32 {
        self.flags.count()
    }

    pub fn is_soc(&self) -> bool {
        self.business_type.is_soc()
    }
}
