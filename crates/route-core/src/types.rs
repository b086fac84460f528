//! Domain types shared across the planning pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// The coordinate fell outside the valid WGS84 range.
#[derive(Debug, Error, PartialEq)]
#[error("coordinate out of bounds: lat={lat}, lon={lon}")]
pub struct OutOfBounds {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    /// Build a coordinate, validating `-90 <= lat <= 90` and
    /// `-180 <= lon <= 180`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if either bound is violated.
    pub fn new(lat: f64, lon: f64) -> Result<Self, OutOfBounds> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(OutOfBounds { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// A driving route's geometry and total distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Ordered polyline, monotone along the travel direction, SRID 4326.
    pub polyline: Vec<Coord>,
    /// Total route distance in miles.
    pub total_miles: f64,
}

/// A fuel station row as read from the spatial store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRow {
    pub opis_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub retail_price: Decimal,
    pub location: Coord,
}

/// A station annotated with its derived mileage along the route.
///
/// The synthetic `Start` (`mileage = 0`) and `Finish`
/// (`mileage = total_miles`) nodes use this same type with `price = 0.0`
/// and empty identity fields, per the spec's design notes — a single
/// record suffices rather than a tagged enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteNode {
    pub mileage: f64,
    pub price: f64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub address: String,
    pub station_id: Option<i64>,
}

impl RouteNode {
    /// The synthetic node the vehicle departs from, full tank, free fuel.
    #[must_use]
    pub fn start() -> Self {
        Self {
            mileage: 0.0,
            price: 0.0,
            lat: 0.0,
            lon: 0.0,
            name: "Start".to_string(),
            address: String::new(),
            station_id: None,
        }
    }

    /// The synthetic node at the end of the route.
    #[must_use]
    pub fn finish(total_miles: f64) -> Self {
        Self {
            mileage: total_miles,
            price: 0.0,
            lat: 0.0,
            lon: 0.0,
            name: "Finish".to_string(),
            address: String::new(),
            station_id: None,
        }
    }
}

/// A refuel event chosen by the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub mileage: f64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub gallons: Decimal,
    pub cost: Decimal,
}

/// The fully assembled response for a planning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub route_geojson: serde_json::Value,
    pub stops: Vec<Stop>,
    pub total_fuel_cost: Decimal,
    pub total_gallons: Decimal,
    pub total_miles: f64,
    pub mpg_used: u32,
}
