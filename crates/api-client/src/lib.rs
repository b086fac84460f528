//! Thin HTTP clients for the two upstreams the route planner depends on:
//!
//! - a Nominatim-shaped forward-geocoder ([`geocoder`])
//! - an OpenRouteService-shaped directions provider ([`router`])
//!
//! Neither client carries planning domain logic; they only build requests,
//! attach auth/timeouts, and parse responses into plain DTOs. Each client is
//! meant to be constructed once per process and shared (it wraps a
//! `reqwest::Client`, which itself pools connections internally).

mod error;
mod geocoder;
mod router;

pub use error::{ApiError, Result};
pub use geocoder::{GeocodeMatch, GeocoderClient};
pub use router::{RouteResponse, RouterClient};
