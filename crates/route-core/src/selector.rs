//! Station selection: given a route's polyline, find candidate fuel
//! stations within a fixed buffer distance of it.
//!
//! The production path (`PgStationStore`) issues a single `ST_DWithin`
//! query against a PostGIS-backed table; the planner is expected to run it
//! behind `tokio::task::spawn_blocking` since diesel's Postgres connection
//! is synchronous. `InMemoryStationStore` exists for tests and does the
//! same distance-to-polyline filtering in process, so selector logic can
//! be exercised without a database.

use crate::constants::DEGREES_PER_MILE;
use crate::error::StoreError;
use crate::types::{Coord, StationRow};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::{BigInt, Double, Text};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A pool of pooled synchronous Postgres connections.
pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Source of fuel station rows near a route.
///
/// Implementations are expected to be cheap to clone/share (the production
/// one wraps a connection pool) and safe to call from multiple tasks.
pub trait StationStore: Send + Sync {
    /// Return every station within `buffer_miles` of `polyline`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying query fails.
    fn stations_near(&self, polyline: &[Coord], buffer_miles: f64) -> Result<Vec<StationRow>, StoreError>;
}

#[derive(QueryableByName)]
struct StationSqlRow {
    #[diesel(sql_type = BigInt)]
    opis_id: i64,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    address: String,
    #[diesel(sql_type = Text)]
    city: String,
    #[diesel(sql_type = Text)]
    state: String,
    #[diesel(sql_type = Text)]
    retail_price: String,
    #[diesel(sql_type = Double)]
    lat: f64,
    #[diesel(sql_type = Double)]
    lon: f64,
}

impl TryFrom<StationSqlRow> for StationRow {
    type Error = StoreError;

    fn try_from(row: StationSqlRow) -> Result<Self, Self::Error> {
        let retail_price = Decimal::from_str(&row.retail_price)
            .map_err(|e| StoreError::Backend(format!("unparseable retail_price: {e}")))?;
        let location = Coord::new(row.lat, row.lon)
            .map_err(|e| StoreError::Backend(format!("station has invalid coordinates: {e}")))?;
        Ok(Self {
            opis_id: row.opis_id,
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            retail_price,
            location,
        })
    }
}

/// Postgres/PostGIS-backed station store.
///
/// Diesel has no native geometry support, so the spatial predicate is a
/// raw `ST_DWithin` query against a `geography` column built from the
/// route polyline's WKT linestring.
pub struct PgStationStore {
    pool: DbPool,
}

impl PgStationStore {
    /// Build a connection pool against `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the pool cannot be built (e.g. the URL is
    /// malformed).
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(|e| StoreError::Backend(format!("failed to build connection pool: {e}")))?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StationStore for PgStationStore {
    fn stations_near(&self, polyline: &[Coord], buffer_miles: f64) -> Result<Vec<StationRow>, StoreError> {
        let wkt = linestring_wkt(polyline);
        let buffer_degrees = buffer_miles * DEGREES_PER_MILE;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Backend(format!("failed to get connection: {e}")))?;

        let rows = sql_query(
            "SELECT opis_id, name, address, city, state, retail_price::text AS retail_price, lat, lon \
             FROM fuel_stations \
             WHERE ST_DWithin(geom, ST_GeogFromText($1), $2)",
        )
        .bind::<Text, _>(wkt)
        .bind::<Double, _>(buffer_degrees)
        .load::<StationSqlRow>(&mut conn)
        .map_err(|e| StoreError::Backend(format!("query failed: {e}")))?;

        rows.into_iter().map(StationRow::try_from).collect()
    }
}

fn linestring_wkt(polyline: &[Coord]) -> String {
    let points: Vec<String> = polyline
        .iter()
        .map(|c| format!("{} {}", c.lon, c.lat))
        .collect();
    format!("LINESTRING({})", points.join(", "))
}

/// In-memory station store for tests: filters a fixed set of rows by
/// perpendicular distance to the polyline, the same predicate
/// `PgStationStore` pushes down to Postgres.
pub struct InMemoryStationStore {
    rows: Vec<StationRow>,
}

impl InMemoryStationStore {
    #[must_use]
    pub fn new(rows: Vec<StationRow>) -> Self {
        Self { rows }
    }
}

impl StationStore for InMemoryStationStore {
    fn stations_near(&self, polyline: &[Coord], buffer_miles: f64) -> Result<Vec<StationRow>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| distance_to_polyline_miles(row.location, polyline) <= buffer_miles)
            .cloned()
            .collect())
    }
}

/// Shortest distance in miles from `point` to any segment of `polyline`.
///
/// Adapted from the point-to-line-segment projection used elsewhere for
/// 3D Cartesian space, collapsed to 2D lat/lon degrees and converted to
/// miles via [`DEGREES_PER_MILE`]. This is an approximation (it treats
/// degrees as locally flat) adequate for a search buffer on the order of
/// tens of miles.
#[must_use]
pub fn distance_to_polyline_miles(point: Coord, polyline: &[Coord]) -> f64 {
    polyline
        .windows(2)
        .map(|seg| perpendicular_distance_degrees(point, seg[0], seg[1]))
        .fold(f64::INFINITY, f64::min)
        / DEGREES_PER_MILE
}

fn perpendicular_distance_degrees(point: Coord, a: Coord, b: Coord) -> f64 {
    let (px, py) = (point.lon, point.lat);
    let (ax, ay) = (a.lon, a.lat);
    let (bx, by) = (b.lon, b.lat);

    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq > 0.0 {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let (proj_x, proj_y) = (ax + t * dx, ay + t * dy);
    ((px - proj_x).powi(2) + (py - proj_y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(opis_id: i64, lat: f64, lon: f64, price: &str) -> StationRow {
        StationRow {
            opis_id,
            name: format!("station-{opis_id}"),
            address: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            retail_price: Decimal::from_str(price).unwrap(),
            location: Coord::new(lat, lon).unwrap(),
        }
    }

    #[test]
    fn finds_stations_within_buffer_of_straight_polyline() {
        let polyline = vec![
            Coord::new(0.0, 0.0).unwrap(),
            Coord::new(0.0, 1.0).unwrap(),
        ];
        let store = InMemoryStationStore::new(vec![
            station(1, 0.001, 0.5, "3.50"),
            station(2, 5.0, 5.0, "3.50"),
        ]);
        let found = store.stations_near(&polyline, 10.0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].opis_id, 1);
    }

    #[test]
    fn excludes_stations_outside_buffer() {
        let polyline = vec![
            Coord::new(0.0, 0.0).unwrap(),
            Coord::new(0.0, 1.0).unwrap(),
        ];
        let store = InMemoryStationStore::new(vec![station(1, 2.0, 0.5, "3.50")]);
        let found = store.stations_near(&polyline, 10.0).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn perpendicular_distance_clamps_to_segment_endpoints() {
        let a = Coord::new(0.0, 0.0).unwrap();
        let b = Coord::new(0.0, 1.0).unwrap();
        let beyond_b = Coord::new(0.0, 2.0).unwrap();
        let dist = perpendicular_distance_degrees(beyond_b, a, b);
        assert!((dist - 1.0).abs() < 1e-9);
    }
}
