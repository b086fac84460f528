//! The minimum-cost refueling optimizer.
//!
//! Nodes are laid out along the route by mileage (`Start`, candidate
//! stations, `Finish`); an edge `i -> j` exists whenever `j` is reachable
//! from `i` on one full tank. The cheapest path through that DAG is the
//! cheapest sequence of refueling stops. The graph is built with
//! `petgraph::DiGraph` for the same reasons the rest of this workspace
//! reaches for petgraph, but the shortest path itself is a hand-rolled
//! forward pass, not `petgraph::algo::astar`/`dijkstra`: the tie-break
//! rule (prefer the earliest-visited predecessor on equal cost) and the
//! early `continue` once an edge exceeds vehicle range aren't expressible
//! through a generic shortest-path call over this DAG.

use crate::constants::VEHICLE_RANGE_MI;
use crate::error::OptimizerError;
use crate::types::{RouteNode, Stop, StationRow};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// A DAG over mileage-sorted nodes, edges gated by vehicle range.
struct RefuelGraph {
    graph: DiGraph<RouteNode, f64>,
    order: Vec<NodeIndex>,
}

impl RefuelGraph {
    fn build(nodes: &[RouteNode]) -> Self {
        let mut graph = DiGraph::new();
        let indices: Vec<NodeIndex> = nodes.iter().cloned().map(|n| graph.add_node(n)).collect();

        for (i, &from) in indices.iter().enumerate() {
            let from_mileage = nodes[i].mileage;
            for (j, &to) in indices.iter().enumerate().skip(i + 1) {
                let gap = nodes[j].mileage - from_mileage;
                if gap > VEHICLE_RANGE_MI {
                    break;
                }
                graph.add_edge(from, to, gap);
            }
        }

        Self { graph, order: indices }
    }
}

/// Run the forward DP and return the chosen path as node indices into
/// `nodes`, from `Start` to `Finish` inclusive.
fn shortest_path(nodes: &[RouteNode], mpg: f64) -> Result<Vec<usize>, OptimizerError> {
    let refuel = RefuelGraph::build(nodes);
    let n = nodes.len();

    let mut cost = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    cost[0] = 0.0;

    for i in 0..n {
        if cost[i].is_infinite() {
            continue;
        }
        let node_idx = refuel.order[i];
        for edge in refuel.graph.edges(node_idx) {
            let j = edge.target().index();
            let gap_miles = *edge.weight();
            let gallons_needed = gap_miles / mpg;
            let leg_cost = nodes[i].price * gallons_needed;
            let candidate = cost[i] + leg_cost;

            if candidate < cost[j] {
                cost[j] = candidate;
                predecessor[j] = Some(i);
            }
        }
    }

    let finish = n - 1;
    if cost[finish].is_infinite() {
        return Err(OptimizerError::Infeasible);
    }

    let mut path = vec![finish];
    let mut current = finish;
    while let Some(prev) = predecessor[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Ok(path)
}

/// Find the minimum-cost refueling plan.
///
/// `nodes` must be sorted by mileage with `Start` first and `Finish` last
/// (as produced by [`crate::nodes::build_nodes`]). `stations` supplies the
/// exact `Decimal` retail price for each station id, so the reported
/// totals aren't subject to the `f64` rounding the DP itself uses to pick
/// the path.
///
/// # Errors
///
/// Returns [`OptimizerError::Infeasible`] if some consecutive gap between
/// nodes exceeds the vehicle's range with no reachable station between
/// them.
pub fn find_cheapest_refuel_plan(
    nodes: &[RouteNode],
    mpg: f64,
    stations: &[StationRow],
) -> Result<(Vec<Stop>, Decimal, Decimal), OptimizerError> {
    let path = shortest_path(nodes, mpg)?;
    let prices_by_id: HashMap<i64, Decimal> = stations.iter().map(|s| (s.opis_id, s.retail_price)).collect();

    let mpg_decimal = Decimal::from_f64_retain(mpg).unwrap_or(Decimal::new(10, 0));

    let mut stops = Vec::new();
    let mut total_gallons = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;

    for window in path.windows(2) {
        let (i, j) = (window[0], window[1]);
        let station_node = &nodes[i];
        let Some(station_id) = station_node.station_id else {
            continue;
        };

        let gap_miles = nodes[j].mileage - station_node.mileage;
        let gap_decimal = Decimal::from_f64_retain(gap_miles).unwrap_or(Decimal::ZERO);
        let gallons = gap_decimal / mpg_decimal;
        let price = prices_by_id
            .get(&station_id)
            .copied()
            .unwrap_or_else(|| Decimal::from_f64_retain(station_node.price).unwrap_or_default());
        let cost = price * gallons;

        total_gallons += gallons;
        total_cost += cost;

        stops.push(Stop {
            mileage: station_node.mileage,
            lat: station_node.lat,
            lon: station_node.lon,
            name: station_node.name.clone(),
            address: station_node.address.clone(),
            price,
            gallons,
            cost,
        });
    }

    Ok((stops, total_cost, total_gallons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn station(id: i64, mileage: f64, price: f64) -> RouteNode {
        RouteNode {
            mileage,
            price,
            lat: 0.0,
            lon: 0.0,
            name: format!("station-{id}"),
            address: String::new(),
            station_id: Some(id),
        }
    }

    fn station_row(id: i64, price: &str) -> StationRow {
        StationRow {
            opis_id: id,
            name: format!("station-{id}"),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            retail_price: Decimal::from_str(price).unwrap(),
            location: Coord::new(0.0, 0.0).unwrap(),
        }
    }

    #[test]
    fn picks_cheaper_station_when_both_are_reachable() {
        let nodes = vec![
            RouteNode::start(),
            station(1, 100.0, 4.00),
            station(2, 150.0, 2.50),
            RouteNode::finish(400.0),
        ];
        let stations = vec![station_row(1, "4.00"), station_row(2, "2.50")];

        let (stops, total_cost, _) = find_cheapest_refuel_plan(&nodes, 10.0, &stations).unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "station-2");
        assert_eq!(total_cost, Decimal::from_str("2.50").unwrap() * Decimal::from_str("25").unwrap());
    }

    #[test]
    fn greedy_trap_skips_the_nearer_pricier_station() {
        // A greedy walk that always refuels at the first reachable station
        // would stop at mile 100 ($4.00) and again at mile 800 ($3.00). The
        // DP instead holds the free departure tank past mile 100 and buys
        // everything it needs at the $2.00 station, skipping both.
        let nodes = vec![
            RouteNode::start(),
            station(1, 100.0, 4.00),
            station(2, 450.0, 2.00),
            station(3, 800.0, 3.00),
            RouteNode::finish(900.0),
        ];
        let stations = vec![station_row(1, "4.00"), station_row(2, "2.00"), station_row(3, "3.00")];

        let (stops, total_cost, total_gallons) = find_cheapest_refuel_plan(&nodes, 10.0, &stations).unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "station-2");
        assert_eq!(total_cost, Decimal::from_str("90.00").unwrap());
        assert_eq!(total_gallons, Decimal::from_str("45").unwrap());
    }

    #[test]
    fn infeasible_when_gap_exceeds_range() {
        let nodes = vec![RouteNode::start(), RouteNode::finish(900.0)];
        let result = find_cheapest_refuel_plan(&nodes, 10.0, &[]);
        assert_eq!(result.unwrap_err(), OptimizerError::Infeasible);
    }

    #[test]
    fn no_stops_needed_when_finish_in_range() {
        let nodes = vec![RouteNode::start(), RouteNode::finish(200.0)];
        let (stops, total_cost, total_gallons) = find_cheapest_refuel_plan(&nodes, 10.0, &[]).unwrap();
        assert!(stops.is_empty());
        assert_eq!(total_cost, Decimal::ZERO);
        assert_eq!(total_gallons, Decimal::ZERO);
    }
}
