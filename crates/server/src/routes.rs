//! API route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use planner::PlanError;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/route", get(get_route).post(post_route))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct RouteQuery {
    start: String,
    end: String,
}

async fn get_route(State(state): State<AppState>, Query(query): Query<RouteQuery>) -> Response {
    plan_and_respond(&state, &query.start, &query.end).await
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    start: String,
    end: String,
}

async fn post_route(State(state): State<AppState>, Json(body): Json<RouteRequest>) -> Response {
    plan_and_respond(&state, &body.start, &body.end).await
}

async fn plan_and_respond(state: &AppState, start: &str, end: &str) -> Response {
    match state.planner.plan(start, end).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            error!("route planning failed: {e}");
            (status_for(&e), Json(ErrorBody { detail: e.to_string() })).into_response()
        }
    }
}

fn status_for(err: &PlanError) -> StatusCode {
    match err {
        PlanError::InputInvalid(_)
        | PlanError::ResolutionFailed(_)
        | PlanError::Upstream(_)
        | PlanError::Infeasible(_) => StatusCode::BAD_REQUEST,
        PlanError::StoreFailed(_) | PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}
