//! Mock duration oracles.

use std::cell::RefCell;

use tour_planner::polyline::Polyline;
use tour_planner::{Coordinate, DurationOracle, OracleError, RouteEstimate};

/// Synthetic linear model: a fixed number of seconds per leg.
pub struct PerLegOracle {
    pub seconds_per_leg: f64,
    pub calls: RefCell<Vec<Vec<Coordinate>>>,
}

impl PerLegOracle {
    pub fn new(seconds_per_leg: f64) -> Self {
        Self {
            seconds_per_leg,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl DurationOracle for PerLegOracle {
    fn route(&self, waypoints: &[Coordinate]) -> Result<RouteEstimate, OracleError> {
        self.calls.borrow_mut().push(waypoints.to_vec());
        Ok(RouteEstimate {
            duration_seconds: self.seconds_per_leg * (waypoints.len() - 1) as f64,
            distance_meters: 0.0,
            geometry: Polyline::new(waypoints.to_vec()),
        })
    }
}

/// Succeeds for the first `succeed_for` calls, then fails.
pub struct FailingOracle {
    pub succeed_for: usize,
    pub inner: PerLegOracle,
}

impl FailingOracle {
    pub fn new(succeed_for: usize) -> Self {
        Self {
            succeed_for,
            inner: PerLegOracle::new(600.0),
        }
    }
}

impl DurationOracle for FailingOracle {
    fn route(&self, waypoints: &[Coordinate]) -> Result<RouteEstimate, OracleError> {
        if self.inner.call_count() >= self.succeed_for {
            return Err(OracleError::Unavailable("routing backend down".to_string()));
        }
        self.inner.route(waypoints)
    }
}
