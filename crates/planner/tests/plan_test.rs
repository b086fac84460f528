use api_client::{GeocoderClient, RouterClient};
use route_core::{Coord, InMemoryStationStore, StationRow};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

fn station(id: i64, lat: f64, lon: f64, price: &str) -> StationRow {
    StationRow {
        opis_id: id,
        name: format!("station-{id}"),
        address: "1 Main St".to_string(),
        city: "Somewhere".to_string(),
        state: "CA".to_string(),
        retail_price: Decimal::from_str(price).unwrap(),
        location: Coord::new(lat, lon).unwrap(),
    }
}

#[tokio::test]
async fn plans_a_route_with_literal_coordinates_and_caches_result() {
    let mut route_server = mockito::Server::new_async().await;
    let _m = route_server
        .mock("POST", mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"coordinates": [[-118.2437, 34.0522], [-115.1398, 36.1699]]},
                    "properties": {"summary": {"distance": 640000.0}}
                }]
            }"#,
        )
        .create_async()
        .await;

    let geocoder = GeocoderClient::with_base_url("test/1.0 (test@example.com)", route_server.url());
    let router = RouterClient::with_base_url("test-key", route_server.url());
    let stations = Arc::new(InMemoryStationStore::new(vec![station(1, 35.0, -117.0, "3.50")]));

    let planner = planner::RoutePlanner::new(geocoder, router, stations);

    let result = planner
        .plan("34.0522,-118.2437", "36.1699,-115.1398")
        .await
        .expect("plan should succeed");

    assert!(result.total_miles > 0.0);
    assert_eq!(result.mpg_used, 10);

    let cached = planner
        .plan("34.0522,-118.2437", "36.1699,-115.1398")
        .await
        .expect("second plan call should hit the cache");
    assert_eq!(cached.total_miles, result.total_miles);
}

#[tokio::test]
async fn rejects_out_of_bounds_literal_coordinates_before_any_upstream_call() {
    let geocoder = GeocoderClient::new("test/1.0 (test@example.com)");
    let router = RouterClient::new("test-key");
    let stations = Arc::new(InMemoryStationStore::new(vec![]));
    let planner = planner::RoutePlanner::new(geocoder, router, stations);

    let err = planner.plan("200.0,-300.0", "36.0,-115.0").await.unwrap_err();
    assert!(matches!(err, planner::PlanError::InputInvalid(_)));
}
