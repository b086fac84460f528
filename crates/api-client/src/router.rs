//! Client for an OpenRouteService-shaped directions provider.
//!
//! Accepts two `(lon, lat)` endpoints and returns a GeoJSON `FeatureCollection`
//! whose first feature carries the route geometry and a `summary.distance` in
//! metres. The caller is responsible for the `(lat, lon)` <-> `(lon, lat)`
//! swap at the crate boundary; this client only ever speaks `(lon, lat)`,
//! matching the provider's wire format.

use crate::{ApiError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org/v2/directions/driving-car/geojson";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for a routing provider.
#[derive(Clone)]
pub struct RouterClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RouterClient {
    /// Create a new client carrying the given bearer API key.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` cannot be built, which
    /// only happens if the TLS backend fails to initialize.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    #[cfg(any(test, feature = "test-util"))]
    #[doc(hidden)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(api_key);
        client.base_url = base_url.into();
        client
    }

    /// Request a route between two `(lon, lat)` coordinates.
    #[instrument(skip(self))]
    pub async fn route(&self, start_lon_lat: (f64, f64), end_lon_lat: (f64, f64)) -> Result<RouteResponse> {
        let body = DirectionsRequest {
            coordinates: vec![
                [start_lon_lat.0, start_lon_lat.1],
                [end_lon_lat.0, end_lon_lat.1],
            ],
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let resp_body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                body: resp_body,
            });
        }

        let text = response.text().await?;
        let parsed: FeatureCollection = serde_json::from_str(&text)?;
        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Malformed("response contained no features".to_string()))?;

        Ok(RouteResponse {
            coordinates_lon_lat: feature.geometry.coordinates,
            distance_meters: feature.properties.summary.distance,
        })
    }
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>,
}

/// Parsed result of a directions request: raw `(lon, lat)` polyline and
/// total distance in metres, exactly as the wire format carries them.
#[derive(Debug, Clone)]
pub struct RouteResponse {
    pub coordinates_lon_lat: Vec<[f64; 2]>,
    pub distance_meters: f64,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[-118.2437, 34.0522], [-73.9857, 40.7484]]
            },
            "properties": {
                "summary": { "distance": 4500000.0, "duration": 160000.0 }
            }
        }]
    }"#;

    #[tokio::test]
    async fn route_parses_geometry_and_distance() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE_RESPONSE)
            .create_async()
            .await;

        let client = RouterClient::with_base_url("test-key", server.url());
        let result = client
            .route((-118.2437, 34.0522), (-73.9857, 40.7484))
            .await
            .unwrap();

        assert_eq!(result.coordinates_lon_lat.len(), 2);
        assert!((result.distance_meters - 4_500_000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn route_surfaces_non_2xx_as_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let client = RouterClient::with_base_url("bad-key", server.url());
        let err = client
            .route((-118.2437, 34.0522), (-73.9857, 40.7484))
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, .. } => assert_eq!(status, 401),
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
