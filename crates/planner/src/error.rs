//! The planner's top-level error type. `server` maps each variant to an
//! HTTP status; nothing below this layer knows about HTTP.

use api_client::ApiError;
use route_core::{OptimizerError, OutOfBounds, StoreError};
use thiserror::Error;

/// Everything that can go wrong while planning a route.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A location string was a literal decimal pair but out of WGS84
    /// bounds, or otherwise failed input validation before any upstream
    /// call was made.
    #[error("invalid input: {0}")]
    InputInvalid(#[from] OutOfBounds),

    /// The geocoder had no match for one of the supplied locations.
    #[error("could not resolve location: {0}")]
    ResolutionFailed(String),

    /// A call to the geocoder or router upstream failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] ApiError),

    /// The station store query failed.
    #[error("station lookup failed: {0}")]
    StoreFailed(#[from] StoreError),

    /// No feasible refueling plan exists for this route.
    #[error("no feasible refueling plan: {0}")]
    Infeasible(#[from] OptimizerError),

    /// Something internal broke in a way the caller can't act on (e.g. a
    /// blocking task panicked).
    #[error("internal error: {0}")]
    Internal(String),
}
