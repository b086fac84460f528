//! Wires the API clients and route-core's pure domain logic into the
//! seven-stage planning pipeline: resolve locations, fetch a route, select
//! candidate stations, build and thin the node graph, optimize refueling
//! stops, and assemble the response — with a cache sitting in front of
//! all of it.

use crate::cache::RouteCache;
use crate::error::PlanError;
use api_client::{GeocoderClient, RouterClient};
use route_core::{
    assemble, build_nodes, find_cheapest_refuel_plan, parse_decimal_pair, prefilter_cheapest_per_bucket,
    Coord, PlanResult, StationStore,
};
use std::sync::Arc;
use tracing::instrument;

const VEHICLE_MPG: f64 = route_core::constants::VEHICLE_MPG;
const STATION_BUFFER_MI: f64 = route_core::constants::STATION_BUFFER_MI;

/// Orchestrates a single route-planning request end to end.
pub struct RoutePlanner {
    geocoder: GeocoderClient,
    router: RouterClient,
    stations: Arc<dyn StationStore>,
    cache: RouteCache,
}

impl RoutePlanner {
    #[must_use]
    pub fn new(geocoder: GeocoderClient, router: RouterClient, stations: Arc<dyn StationStore>) -> Self {
        Self {
            geocoder,
            router,
            stations,
            cache: RouteCache::default(),
        }
    }

    /// Plan a route from `start` to `end`, each either a free-text place
    /// name or a literal `"lat,lon"` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if either location is invalid or unresolvable,
    /// an upstream call fails, the station lookup fails, or no feasible
    /// refueling plan exists for the route.
    #[instrument(skip(self))]
    pub async fn plan(&self, start: &str, end: &str) -> Result<PlanResult, PlanError> {
        let start_coord = self.resolve(start).await?;
        let end_coord = self.resolve(end).await?;

        let cache_key = RouteCache::fingerprint(start_coord, end_coord);
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let route = self
            .router
            .route((start_coord.lon, start_coord.lat), (end_coord.lon, end_coord.lat))
            .await?;

        let polyline: Vec<Coord> = route
            .coordinates_lon_lat
            .iter()
            .map(|[lon, lat]| Coord { lat: *lat, lon: *lon })
            .collect();
        let total_miles = route.distance_meters * route_core::constants::METERS_TO_MILES;

        let stations = {
            let store = Arc::clone(&self.stations);
            let polyline = polyline.clone();
            tokio::task::spawn_blocking(move || store.stations_near(&polyline, STATION_BUFFER_MI))
                .await
                .map_err(|e| PlanError::Internal(format!("station lookup task panicked: {e}")))??
        };

        let nodes = build_nodes(&polyline, total_miles, &stations);
        let nodes = prefilter_cheapest_per_bucket(nodes);

        let (stops, total_fuel_cost, total_gallons) = find_cheapest_refuel_plan(&nodes, VEHICLE_MPG, &stations)?;

        let result = assemble(&polyline, total_miles, stops, total_fuel_cost, total_gallons, VEHICLE_MPG as u32);

        self.cache.insert(cache_key, result.clone());
        Ok(result)
    }

    async fn resolve(&self, query: &str) -> Result<Coord, PlanError> {
        if let Some(parsed) = parse_decimal_pair(query) {
            return parsed.map_err(PlanError::from);
        }

        // Geocoder transport/timeout/non-2xx failures are indistinguishable
        // from "no match" here: only the router surfaces upstream failures
        // to the caller as `Upstream`.
        let Some(found) = self.geocoder.search(query).await.ok().flatten() else {
            return Err(PlanError::ResolutionFailed(query.to_string()));
        };

        let lat: f64 = found
            .lat
            .parse()
            .map_err(|_| PlanError::ResolutionFailed(query.to_string()))?;
        let lon: f64 = found
            .lon
            .parse()
            .map_err(|_| PlanError::ResolutionFailed(query.to_string()))?;

        Coord::new(lat, lon).map_err(PlanError::from)
    }
}
