//! tour-planner
//!
//! Splits a set of surveyed points into duration-bounded vehicle routes:
//! near-duplicates are merged, a nearest-neighbor tour is built from the
//! depot and tightened with 2-opt, then the tour is cut into trips using an
//! external duration oracle.

pub mod cluster;
pub mod error;
pub mod geo;
pub mod haversine;
pub mod ingest;
pub mod osrm;
pub mod polyline;
pub mod render;
pub mod segment;
pub mod solver;
pub mod tour;
pub mod traits;

pub use error::{OracleError, PlanError};
pub use geo::{Coordinate, DEFAULT_DEPOT, Point};
pub use segment::{CancelToken, Route};
pub use solver::{Plan, PlanOptions, plan};
pub use traits::{DurationOracle, Located, RouteEstimate};
