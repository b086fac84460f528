//! Orchestrates the route-planning pipeline: resolves free-text or literal
//! coordinate inputs, fetches a route, selects and optimizes refueling
//! stops, and caches the assembled result.

mod cache;
mod error;
mod orchestrator;

pub use cache::RouteCache;
pub use error::PlanError;
pub use orchestrator::RoutePlanner;
