//! Error types local to the planning core. `planner` folds these into its
//! top-level `PlanError`; nothing here knows about HTTP.

use thiserror::Error;

/// Errors from the station selector's persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store (diesel, here) reported an error. Its message is
    /// kept for logging but is not meant to reach an HTTP client verbatim.
    #[error("station store query failed: {0}")]
    Backend(String),
}

/// Errors from the DAG optimizer.
#[derive(Debug, Error, PartialEq)]
pub enum OptimizerError {
    /// No Start -> Finish path exists: some consecutive gap between nodes
    /// exceeds `VEHICLE_RANGE_MI` with no station in between.
    #[error("no feasible refueling path: a gap exceeds vehicle range")]
    Infeasible,
}
