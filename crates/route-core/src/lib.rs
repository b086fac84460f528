//! Pure planning domain logic: coordinate/geometry types, the fast-path
//! geocoder, fuel station selection, the DAG refueling optimizer, and
//! GeoJSON response assembly.
//!
//! Nothing in this crate knows about HTTP, upstream providers, or caching
//! — those live in `api-client` and `planner`. Everything here is
//! synchronous and deterministic given its inputs, which is what makes it
//! straightforward to unit test without a network or a database.

pub mod assembler;
pub mod constants;
pub mod error;
pub mod geocode;
pub mod nodes;
pub mod optimizer;
pub mod selector;
pub mod types;

pub use assembler::assemble;
pub use error::{OptimizerError, StoreError};
pub use geocode::parse_decimal_pair;
pub use nodes::{build_nodes, prefilter_cheapest_per_bucket, project_onto_route};
pub use optimizer::find_cheapest_refuel_plan;
pub use selector::{DbPool, InMemoryStationStore, PgStationStore, StationStore};
pub use types::{Coord, OutOfBounds, PlanResult, RouteGeometry, RouteNode, StationRow, Stop};
