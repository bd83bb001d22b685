//! Raw-store reading.
//!
//! The raw store is produced by an external collector (or the synthetic
//! generator); the only contract is the `cafes` table column shape.

use std::path::Path;

use ci_common::RawCafe;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::StoreError;

/// Name of the raw input table.
pub const RAW_TABLE: &str = "cafes";

/// List the user tables present in a store.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

/// Read every row of the raw `cafes` table.
///
/// Fails if the file cannot be opened or the table is absent; nulls in any
/// column are preserved for the validator to classify.
pub fn read_raw_cafes(path: &Path) -> Result<Vec<RawCafe>, StoreError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let tables = list_tables(&conn)?;
    debug!(tables = %tables.join(", "), "raw store tables");
    if !tables.iter().any(|t| t == RAW_TABLE) {
        return Err(StoreError::TableNotFound(RAW_TABLE.to_string()));
    }

    let mut stmt = conn.prepare(
        "SELECT cafe_id, name, address, neighborhood, latitude, longitude, phone, website, \
         cafe_type, ownership, avg_beverage_price, has_food, has_wifi, seating_capacity, \
         ambiance, parking_availability, hours_weekday, hours_weekend, date_opened, \
         instagram_handle, google_rating, review_count, created_at, updated_at \
         FROM cafes ORDER BY rowid",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RawCafe {
                cafe_id: row.get(0)?,
                name: row.get(1)?,
                address: row.get(2)?,
                neighborhood: row.get(3)?,
                latitude: row.get(4)?,
                longitude: row.get(5)?,
                phone: row.get(6)?,
                website: row.get(7)?,
                cafe_type: row.get(8)?,
                ownership: row.get(9)?,
                avg_beverage_price: row.get(10)?,
                has_food: row.get(11)?,
                has_wifi: row.get(12)?,
                seating_capacity: row.get(13)?,
                ambiance: row.get(14)?,
                parking_availability: row.get(15)?,
                hours_weekday: row.get(16)?,
                hours_weekend: row.get(17)?,
                date_opened: row.get(18)?,
                instagram_handle: row.get(19)?,
                google_rating: row.get(20)?,
                review_count: row.get(21)?,
                created_at: row.get(22)?,
                updated_at: row.get(23)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// DDL for the raw `cafes` table, used by the synthetic generator and tests.
pub const RAW_TABLE_DDL: &str = "\
CREATE TABLE IF NOT EXISTS cafes (
    cafe_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT,
    neighborhood TEXT,
    latitude REAL,
    longitude REAL,
    phone TEXT,
    website TEXT,
    cafe_type TEXT,
    ownership TEXT,
    avg_beverage_price REAL,
    has_food TEXT,
    has_wifi TEXT,
    seating_capacity INTEGER,
    ambiance TEXT,
    parking_availability TEXT,
    hours_weekday TEXT,
    hours_weekend TEXT,
    date_opened TEXT,
    instagram_handle TEXT,
    google_rating REAL,
    review_count INTEGER,
    created_at TEXT,
    updated_at TEXT
)";
