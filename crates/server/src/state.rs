//! Application state shared across handlers.

use api_client::{GeocoderClient, RouterClient};
use planner::RoutePlanner;
use route_core::{PgStationStore, StationStore, StoreError};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<RoutePlanner>,
}

impl AppState {
    /// Build production state, backed by a real Postgres/PostGIS station
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database connection pool cannot be
    /// built.
    pub fn new(
        routing_api_key: impl Into<String>,
        geocoder_contact: impl Into<String>,
        database_url: &str,
    ) -> Result<Self, StoreError> {
        let stations: Arc<dyn StationStore> = Arc::new(PgStationStore::new(database_url)?);
        Ok(Self::with_station_store(routing_api_key, geocoder_contact, stations))
    }

    /// Build state against an arbitrary [`StationStore`], e.g. an
    /// in-memory one for tests.
    #[must_use]
    pub fn with_station_store(
        routing_api_key: impl Into<String>,
        geocoder_contact: impl Into<String>,
        stations: Arc<dyn StationStore>,
    ) -> Self {
        let geocoder = GeocoderClient::new(geocoder_contact);
        let router = RouterClient::new(routing_api_key);
        Self::with_clients(geocoder, router, stations)
    }

    /// Build state from already-constructed clients, e.g. ones pointed at
    /// a mock server in tests.
    #[must_use]
    pub fn with_clients(geocoder: GeocoderClient, router: RouterClient, stations: Arc<dyn StationStore>) -> Self {
        Self {
            planner: Arc::new(RoutePlanner::new(geocoder, router, stations)),
        }
    }
}
