//! Turning a polyline and a set of candidate stations into mileage-ordered
//! [`RouteNode`]s, then thinning that set down to one candidate per
//! `PREFILTER_SEGMENT_MI` bucket so the DAG optimizer sees a bounded number
//! of nodes regardless of how dense the station search turned out to be.

use crate::constants::{DEGREES_PER_MILE, PREFILTER_SEGMENT_MI};
use crate::types::{Coord, RouteNode, StationRow};
use std::collections::HashMap;

/// Project `point` onto `polyline` and return the cumulative distance (in
/// degree-derived miles, not road miles) from the polyline's start to the
/// closest point. Callers convert this to a `[0, 1]` fraction of the whole
/// polyline's length (see [`polyline_length_miles`]) before scaling by the
/// router's actual road-mile total — the polyline's flat-degree length and
/// the route's `total_miles` are different units of "how far," and only the
/// fraction is portable between them.
#[must_use]
pub fn project_onto_route(point: Coord, polyline: &[Coord]) -> f64 {
    let mut best_mileage = 0.0;
    let mut best_dist = f64::INFINITY;
    let mut cumulative = 0.0;

    for seg in polyline.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        let seg_len_mi = segment_length_miles(a, b);

        let (t, dist_deg) = segment_projection(point, a, b);
        if dist_deg < best_dist {
            best_dist = dist_deg;
            best_mileage = cumulative + t * seg_len_mi;
        }
        cumulative += seg_len_mi;
    }

    best_mileage
}

/// Total degree-derived length of `polyline`, end to end.
#[must_use]
pub fn polyline_length_miles(polyline: &[Coord]) -> f64 {
    polyline.windows(2).map(|seg| segment_length_miles(seg[0], seg[1])).sum()
}

fn segment_projection(point: Coord, a: Coord, b: Coord) -> (f64, f64) {
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
    let dist = ((px - proj_x).powi(2) + (py - proj_y).powi(2)).sqrt();
    (t, dist)
}

/// Approximate distance between two coordinates in miles, flat-earth in
/// degree space and converted via [`DEGREES_PER_MILE`] — consistent with
/// the rest of the pipeline's buffer/prefilter math, not a geodesic.
fn segment_length_miles(a: Coord, b: Coord) -> f64 {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    (dx * dx + dy * dy).sqrt() / DEGREES_PER_MILE
}

/// Turn candidate stations into mileage-ordered nodes, with synthetic
/// `Start`/`Finish` nodes bracketing the route.
#[must_use]
pub fn build_nodes(polyline: &[Coord], total_miles: f64, stations: &[StationRow]) -> Vec<RouteNode> {
    let polyline_len = polyline_length_miles(polyline);

    let mut nodes: Vec<RouteNode> = stations
        .iter()
        .map(|s| {
            let fraction = if polyline_len > 0.0 {
                (project_onto_route(s.location, polyline) / polyline_len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mileage = fraction * total_miles;
            RouteNode {
                mileage,
                price: s.retail_price.to_string().parse().unwrap_or(f64::MAX),
                lat: s.location.lat,
                lon: s.location.lon,
                name: s.name.clone(),
                address: format!("{}, {}, {}", s.address, s.city, s.state),
                station_id: Some(s.opis_id),
            }
        })
        .collect();

    nodes.push(RouteNode::start());
    nodes.push(RouteNode::finish(total_miles));
    nodes.sort_by(|a, b| a.mileage.total_cmp(&b.mileage));
    nodes
}

/// Keep at most one station per `PREFILTER_SEGMENT_MI`-wide bucket of route
/// mileage: the cheapest one. `Start`/`Finish` always survive.
#[must_use]
pub fn prefilter_cheapest_per_bucket(nodes: Vec<RouteNode>) -> Vec<RouteNode> {
    let mut buckets: HashMap<u64, RouteNode> = HashMap::new();
    let mut endpoints = Vec::new();

    for node in nodes {
        if node.station_id.is_none() {
            endpoints.push(node);
            continue;
        }

        let bucket = (node.mileage / PREFILTER_SEGMENT_MI).floor() as u64;
        match buckets.get(&bucket) {
            Some(existing) if existing.price <= node.price => {}
            _ => {
                buckets.insert(bucket, node);
            }
        }
    }

    let mut kept: Vec<RouteNode> = buckets.into_values().chain(endpoints).collect();
    kept.sort_by(|a, b| a.mileage.total_cmp(&b.mileage));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn station(id: i64, lat: f64, lon: f64, price: &str) -> StationRow {
        StationRow {
            opis_id: id,
            name: format!("station-{id}"),
            address: "1 Rd".to_string(),
            city: "Town".to_string(),
            state: "ST".to_string(),
            retail_price: Decimal::from_str(price).unwrap(),
            location: Coord::new(lat, lon).unwrap(),
        }
    }

    #[test]
    fn build_nodes_includes_endpoints_and_sorts_by_mileage() {
        let polyline = vec![Coord::new(0.0, 0.0).unwrap(), Coord::new(0.0, 10.0 * DEGREES_PER_MILE).unwrap()];
        let stations = vec![station(1, 0.0, 5.0 * DEGREES_PER_MILE, "3.00")];
        let nodes = build_nodes(&polyline, 10.0, &stations);

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.first().unwrap().name, "Start");
        assert_eq!(nodes.last().unwrap().name, "Finish");
        assert!((nodes[1].mileage - 5.0).abs() < 1e-6);
    }

    #[test]
    fn prefilter_collapse_keeps_one_survivor_per_bucket() {
        fn stop(mileage: f64, price: f64, name: &str) -> RouteNode {
            RouteNode {
                mileage,
                price,
                lat: 0.0,
                lon: 0.0,
                name: name.to_string(),
                address: String::new(),
                station_id: Some(mileage as i64),
            }
        }

        let nodes = vec![
            RouteNode::start(),
            stop(10.0, 3.5, "a"),
            stop(12.0, 3.2, "b"),
            stop(15.0, 3.45, "c"),
            stop(40.0, 3.9, "d"),
            stop(48.0, 3.1, "cheapest-bucket-0"),
            stop(60.0, 3.3, "cheapest-bucket-1"),
            RouteNode::finish(200.0),
        ];

        let kept = prefilter_cheapest_per_bucket(nodes);
        let station_survivors: Vec<&RouteNode> = kept.iter().filter(|n| n.station_id.is_some()).collect();

        assert_eq!(station_survivors.len(), 2);
        assert!(station_survivors.iter().any(|n| n.name == "cheapest-bucket-0"));
        assert!(station_survivors.iter().any(|n| n.name == "cheapest-bucket-1"));
    }

    #[test]
    fn prefilter_keeps_cheapest_per_bucket() {
        let nodes = vec![
            RouteNode::start(),
            RouteNode {
                mileage: 10.0,
                price: 4.00,
                lat: 0.0,
                lon: 0.0,
                name: "expensive".to_string(),
                address: String::new(),
                station_id: Some(1),
            },
            RouteNode {
                mileage: 20.0,
                price: 3.00,
                lat: 0.0,
                lon: 0.0,
                name: "cheap".to_string(),
                address: String::new(),
                station_id: Some(2),
            },
            RouteNode::finish(100.0),
        ];

        let kept = prefilter_cheapest_per_bucket(nodes);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().any(|n| n.name == "cheap"));
        assert!(!kept.iter().any(|n| n.name == "expensive"));
    }
}
