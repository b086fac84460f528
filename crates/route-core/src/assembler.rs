//! Assembling the optimizer's output and the route geometry into the
//! GeoJSON `FeatureCollection` returned to clients: one `LineString`
//! feature for the route itself, one `Point` feature per chosen stop.

use crate::types::{Coord, PlanResult, Stop};
use rust_decimal::Decimal;
use serde_json::json;

/// Build the final [`PlanResult`], including its embedded GeoJSON.
#[must_use]
pub fn assemble(
    polyline: &[Coord],
    total_miles: f64,
    stops: Vec<Stop>,
    total_fuel_cost: Decimal,
    total_gallons: Decimal,
    mpg_used: u32,
) -> PlanResult {
    let route_geojson = build_feature_collection(polyline, &stops);

    PlanResult {
        route_geojson,
        stops,
        total_fuel_cost,
        total_gallons,
        total_miles,
        mpg_used,
    }
}

fn build_feature_collection(polyline: &[Coord], stops: &[Stop]) -> serde_json::Value {
    let route_coords: Vec<[f64; 2]> = polyline.iter().map(|c| [c.lon, c.lat]).collect();

    let mut features = vec![json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": route_coords,
        },
        "properties": {},
    })];

    features.extend(stops.iter().map(stop_feature));

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn stop_feature(stop: &Stop) -> serde_json::Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [stop.lon, stop.lat],
        },
        "properties": {
            "kind": "stop",
            "name": stop.name,
            "address": stop.address,
            "mileage": stop.mileage,
            "price": stop.price.to_string(),
            "gallons": stop.gallons.to_string(),
            "cost": stop.cost.to_string(),
        },
    })
}
