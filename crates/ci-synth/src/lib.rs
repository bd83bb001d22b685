//! Synthetic raw-store generation.
//!
//! Produces a realistic Edmonton cafe dataset for pipeline testing: the
//! six Square One Coffee locations plus randomly-named competitors, with
//! coordinates, pricing, and reputation fields drawn from the profiles
//! the collected data showed. The output is only an input fixture; the
//! ferry treats it exactly like collector-produced data.

use std::path::Path;

use chrono::Utc;
use ci_store::raw::RAW_TABLE_DDL;
use ci_store::StoreError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;
use tracing::info;

/// The subject business's six fixed locations.
pub const SOC_LOCATIONS: [&str; 6] = [
    "Square One Coffee - Oliver",
    "Square One Coffee - Downtown",
    "Square One Coffee - Whyte Avenue",
    "Square One Coffee - Westmount",
    "Square One Coffee - 124 Street",
    "Square One Coffee - Ritchie",
];

const NEIGHBORHOODS: [&str; 15] = [
    "Downtown",
    "Oliver",
    "Garneau",
    "Whyte Avenue",
    "Bonnie Doon",
    "Westmount",
    "Old Strathcona",
    "Ritchie",
    "Highlands",
    "Jasper Avenue",
    "Alberta Avenue",
    "124 Street",
    "Capilano",
    "Belgravia",
    "Riverdale",
];

const NAME_PREFIXES: [&str; 8] = [
    "The", "Cafe", "Coffee", "Brew", "Bean", "Roast", "Morning", "Daily",
];
const NAME_MIDDLES: [&str; 8] = [
    "Central", "House", "Bar", "Shop", "Co", "Collective", "Studio", "Lab",
];
const NAME_SUFFIXES: [&str; 7] = ["Cafe", "Coffee", "Roasters", "Co.", "House", "Bar", "Kitchen"];

const CAFE_TYPES: [&str; 5] = [
    "specialty_coffee",
    "espresso_bar",
    "full_service_cafe",
    "coffee_shop",
    "roastery_cafe",
];
const OWNERSHIPS: [&str; 4] = [
    "independent",
    "small_chain",
    "regional_chain",
    "national_chain",
];
const AMBIANCES: [&str; 5] = [
    "modern_minimalist",
    "cozy_traditional",
    "industrial_chic",
    "community_hub",
    "grab_and_go",
];
const PARKING_OPTIONS: [&str; 4] = ["street_only", "nearby_lot", "dedicated_parking", "no_parking"];
const FOOD_OPTIONS: [&str; 4] = ["pastries_only", "sandwiches_pastries", "full_menu", "none"];
const WIFI_OPTIONS: [&str; 3] = ["yes", "no", "limited"];
const STREET_NAMES: [&str; 7] = [
    "Jasper Ave",
    "Whyte Ave",
    "124 St",
    "104 St",
    "82 Ave",
    "Gateway Blvd",
    "Calgary Trail",
];

// Generation box, slightly tighter than the validation bounds.
const LAT_RANGE: (f64, f64) = (53.45, 53.62);
const LNG_RANGE: (f64, f64) = (-113.65, -113.40);

/// Generation knobs.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Competitor cafes generated alongside the six SOC locations.
    pub competitors: usize,
    /// Fixed seed for reproducible fixtures.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            competitors: 24,
            seed: None,
        }
    }
}

/// What the generator produced.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSummary {
    pub total: usize,
    pub soc: usize,
    pub competitors: usize,
    pub neighborhoods: usize,
}

/// Generate a raw store at `path`, appending to an existing `cafes`
/// table if one is present (mirroring a collector run).
pub fn generate_raw_store(
    path: &Path,
    options: &GeneratorOptions,
) -> Result<GenerationSummary, StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut conn = Connection::open(path)?;
    conn.execute(RAW_TABLE_DDL, [])?;

    let mut names: Vec<String> = SOC_LOCATIONS.iter().map(|s| s.to_string()).collect();
    for _ in 0..options.competitors {
        names.push(competitor_name(&mut rng));
    }

    let now = Utc::now().to_rfc3339();
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO cafes (name, address, neighborhood, latitude, longitude, phone, \
             website, cafe_type, ownership, avg_beverage_price, has_food, has_wifi, \
             seating_capacity, ambiance, parking_availability, hours_weekday, hours_weekend, \
             date_opened, instagram_handle, google_rating, review_count, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )?;

        for (i, name) in names.iter().enumerate() {
            let is_soc = name.contains("Square One");

            let (cafe_type, ownership, price, food, wifi, seating, ambiance, rating, reviews) =
                if is_soc {
                    (
                        "specialty_coffee",
                        "independent",
                        round2(rng.random_range(4.50..6.00)),
                        "sandwiches_pastries",
                        "yes",
                        rng.random_range(20..=45),
                        "modern_minimalist",
                        round1(rng.random_range(4.3..4.8)),
                        rng.random_range(150..=500),
                    )
                } else {
                    (
                        *pick(&mut rng, &CAFE_TYPES),
                        *pick(&mut rng, &OWNERSHIPS),
                        round2(rng.random_range(3.00..7.50)),
                        *pick(&mut rng, &FOOD_OPTIONS),
                        *pick(&mut rng, &WIFI_OPTIONS),
                        rng.random_range(10..=60),
                        *pick(&mut rng, &AMBIANCES),
                        round1(rng.random_range(3.5..4.9)),
                        rng.random_range(20..=400),
                    )
                };

            let neighborhood = NEIGHBORHOODS[i % NEIGHBORHOODS.len()];
            let latitude = round6(rng.random_range(LAT_RANGE.0..LAT_RANGE.1));
            let longitude = round6(rng.random_range(LNG_RANGE.0..LNG_RANGE.1));

            let address = format!(
                "{} {}, Edmonton, AB",
                rng.random_range(100..=9999),
                pick(&mut rng, &STREET_NAMES)
            );
            let phone = format!(
                "780-{}-{}",
                rng.random_range(100..=999),
                rng.random_range(1000..=9999)
            );
            let website = if rng.random_bool(0.7) {
                Some(format!("https://{}.com", slug(name)))
            } else {
                None
            };
            let instagram = if rng.random_bool(0.8) {
                Some(format!("@{}", slug(name)))
            } else {
                None
            };

            let hours_weekday = if rng.random_bool(0.7) {
                "7:00 AM - 6:00 PM"
            } else {
                "6:30 AM - 7:00 PM"
            };
            let hours_weekend = if rng.random_bool(0.7) {
                "8:00 AM - 5:00 PM"
            } else {
                "8:00 AM - 6:00 PM"
            };
            let date_opened = format!(
                "{}-{:02}-01",
                rng.random_range(2010..=2024),
                rng.random_range(1..=12)
            );

            stmt.execute(rusqlite::params![
                name,
                address,
                neighborhood,
                latitude,
                longitude,
                phone,
                website,
                cafe_type,
                ownership,
                price,
                food,
                wifi,
                seating,
                ambiance,
                *pick(&mut rng, &PARKING_OPTIONS),
                hours_weekday,
                hours_weekend,
                date_opened,
                instagram,
                rating,
                reviews,
                now,
                now,
            ])?;
        }
    }
    tx.commit()?;

    let summary = GenerationSummary {
        total: names.len(),
        soc: SOC_LOCATIONS.len(),
        competitors: options.competitors,
        neighborhoods: NEIGHBORHOODS.len(),
    };
    info!(
        path = %path.display(),
        total = summary.total,
        soc = summary.soc,
        competitors = summary.competitors,
        "synthetic data generated"
    );
    Ok(summary)
}

fn competitor_name(rng: &mut StdRng) -> String {
    let prefix = pick(rng, &NAME_PREFIXES);
    let middle = pick(rng, &NAME_MIDDLES);
    if rng.random_bool(0.3) {
        format!("{prefix} {middle}")
    } else {
        format!("{prefix} {middle} {}", pick(rng, &NAME_SUFFIXES))
    }
}

fn pick<'a, T>(rng: &mut StdRng, pool: &'a [T]) -> &'a T {
    &pool[rng.random_range(0..pool.len())]
}

/// Lower-cased name with spaces and dashes stripped, truncated to the
/// handle length the collector used.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .take(20)
        .collect()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ci_store::read_raw_cafes;

    fn options(seed: u64) -> GeneratorOptions {
        GeneratorOptions {
            competitors: 24,
            seed: Some(seed),
        }
    }

    #[test]
    fn generates_soc_plus_competitors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.sqlite");
        let summary = generate_raw_store(&path, &options(7)).unwrap();
        assert_eq!(summary.total, 30);
        assert_eq!(summary.soc, 6);

        let cafes = read_raw_cafes(&path).unwrap();
        assert_eq!(cafes.len(), 30);
        let soc = cafes
            .iter()
            .filter(|c| c.name.as_deref().unwrap_or("").contains("Square One"))
            .count();
        assert_eq!(soc, 6);
    }

    #[test]
    fn required_fields_are_always_populated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.sqlite");
        generate_raw_store(&path, &options(11)).unwrap();

        for cafe in read_raw_cafes(&path).unwrap() {
            assert!(cafe.cafe_id.is_some());
            assert!(cafe.name.is_some());
            assert!(cafe.neighborhood.is_some());
            assert!(cafe.cafe_type.is_some());
        }
    }

    #[test]
    fn coordinates_stay_inside_generation_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.sqlite");
        generate_raw_store(&path, &options(3)).unwrap();

        for cafe in read_raw_cafes(&path).unwrap() {
            let lat = cafe.latitude.unwrap();
            let lng = cafe.longitude.unwrap();
            assert!((LAT_RANGE.0..=LAT_RANGE.1).contains(&lat));
            assert!((LNG_RANGE.0..=LNG_RANGE.1).contains(&lng));
        }
    }

    #[test]
    fn soc_rows_follow_the_brand_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.sqlite");
        generate_raw_store(&path, &options(5)).unwrap();

        for cafe in read_raw_cafes(&path).unwrap() {
            if cafe.name.as_deref().unwrap_or("").contains("Square One") {
                assert_eq!(cafe.cafe_type.as_deref(), Some("specialty_coffee"));
                assert_eq!(cafe.ownership.as_deref(), Some("independent"));
                let price = cafe.avg_beverage_price.unwrap();
                assert!((4.5..=6.0).contains(&price));
                let rating = cafe.google_rating.unwrap();
                assert!((4.3..=4.8).contains(&rating));
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.sqlite");
        let b = dir.path().join("b.sqlite");
        generate_raw_store(&a, &options(42)).unwrap();
        generate_raw_store(&b, &options(42)).unwrap();

        let names_a: Vec<_> = read_raw_cafes(&a).unwrap().into_iter().map(|c| c.name).collect();
        let names_b: Vec<_> = read_raw_cafes(&b).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn slug_strips_spaces_and_dashes() {
        assert_eq!(slug("Square One Coffee - Oliver"), "squareonecoffeeolive");
        assert_eq!(slug("Bean Co."), "beanco.");
    }
}
