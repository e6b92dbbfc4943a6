//! Core seams of the planner.
//!
//! The planner only needs two things from the outside world: something that
//! has a position, and something that can tell how long it takes to drive a
//! sequence of waypoints.

use crate::error::OracleError;
use crate::geo::Coordinate;
use crate::polyline::Polyline;

/// Anything with a position on the map.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

/// Travel estimate for an ordered list of waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimate {
    /// Total driving duration in seconds.
    pub duration_seconds: f64,
    /// Total driving distance in meters.
    pub distance_meters: f64,
    /// Drivable path for display. The planner forwards it untouched.
    pub geometry: Polyline,
}

/// Provides real travel durations for a visiting sequence.
///
/// Implementations are usually network bound and may fail; the planner
/// never retries a failed call.
pub trait DurationOracle {
    /// Estimate the route through `waypoints` in the given order (at least 2).
    fn route(&self, waypoints: &[Coordinate]) -> Result<RouteEstimate, OracleError>;
}

impl<T: DurationOracle + ?Sized> DurationOracle for &T {
    fn route(&self, waypoints: &[Coordinate]) -> Result<RouteEstimate, OracleError> {
        (**self).route(waypoints)
    }
}
