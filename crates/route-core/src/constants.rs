//! Physical and policy constants for the planning pipeline.
//!
//! These are the authoritative values from the route-planning
//! specification; nothing here is tunable at runtime (see the crate's
//! configuration surface for the knobs that are).

/// Vehicle range in miles: the longest single leg the DAG optimizer may
/// connect with an edge.
pub const VEHICLE_RANGE_MI: f64 = 500.0;

/// Vehicle fuel economy in miles per gallon.
pub const VEHICLE_MPG: f64 = 10.0;

/// Station selector search buffer, in miles, around the route polyline.
pub const STATION_BUFFER_MI: f64 = 10.0;

/// Conversion factor from miles to degrees of latitude/longitude, used to
/// turn `STATION_BUFFER_MI` into a `dwithin`-style degree buffer.
pub const DEGREES_PER_MILE: f64 = 1.0 / 69.0;

/// Pre-filter bucket width in miles.
pub const PREFILTER_SEGMENT_MI: f64 = 50.0;

/// Conversion factor from metres to miles.
pub const METERS_TO_MILES: f64 = 0.000_621_371;

/// Router result cache time-to-live, in seconds.
pub const ROUTE_CACHE_TTL_SECS: u64 = 3600;
