//! Duration-bounded splitting of a tour into vehicle trips.
//!
//! The tour is walked in order and each trip grows one stop at a time while
//! the oracle confirms the trial trip still fits the budget. Every oracle call
//! depends on the previous answer, so calls are strictly sequential.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::geo::Coordinate;
use crate::tour::Tour;
use crate::traits::DurationOracle;

/// Cooperative cancellation flag, checked before every oracle call.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the segmenter stops before its next oracle call.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Inputs to [`segment`] besides the tour and the oracle.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Start of the first trip and the return point.
    pub depot: Coordinate,
    /// Budget per trip in seconds.
    pub max_seconds: f64,
    /// Close every trip at the depot, not only the last one.
    pub return_to_depot_always: bool,
}

/// One vehicle trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Where the trip begins: the depot, or where the previous trip ended.
    pub start: Coordinate,
    /// Tour stops served by this trip, in tour order. Never empty.
    pub stops: Vec<Coordinate>,
    /// Set to the depot when the trip returns there.
    pub end: Option<Coordinate>,
    /// Duration of `start` + `stops` as last confirmed by the oracle.
    pub budgeted_seconds: f64,
    /// Duration of the full waypoint list, including the depot return.
    pub total_seconds: f64,
}

impl Route {
    /// Full visiting sequence: start, stops, then the depot if returning.
    pub fn waypoints(&self) -> Vec<Coordinate> {
        let mut waypoints = Vec::with_capacity(self.stops.len() + 2);
        waypoints.push(self.start);
        waypoints.extend_from_slice(&self.stops);
        waypoints.extend(self.end);
        waypoints
    }

    /// Whether the trip ends at the depot.
    pub fn returns_to_depot(&self) -> bool {
        self.end.is_some()
    }

    /// Where the next trip starts if this one is followed by another.
    pub fn last_waypoint(&self) -> Coordinate {
        self.end
            .or_else(|| self.stops.last().copied())
            .unwrap_or(self.start)
    }
}

/// Greedily partitions `tour` into consecutive trips within `max_seconds`.
///
/// The first stop of a trip is always accepted, even when the oracle reports
/// that it alone overruns the budget; otherwise such a stop could never be
/// routed. Any oracle failure aborts the whole split.
///
/// A budget that is not a positive, finite number of seconds is rejected
/// before the oracle is consulted.
pub fn segment<O>(
    tour: &Tour,
    options: &SegmentOptions,
    oracle: &O,
    cancel: Option<&CancelToken>,
) -> Result<Vec<Route>, PlanError>
where
    O: DurationOracle + ?Sized,
{
    if !options.max_seconds.is_finite() || options.max_seconds <= 0.0 {
        return Err(PlanError::InvalidMaxDuration(options.max_seconds / 3600.0));
    }

    let stops = tour.stops();
    let mut routes = Vec::new();
    let mut start = options.depot;
    let mut index = 0;

    while index < stops.len() {
        let mut route_stops: Vec<Coordinate> = Vec::new();
        let mut budgeted_seconds = 0.0;

        while index < stops.len() {
            let mut trial = Vec::with_capacity(route_stops.len() + 2);
            trial.push(start);
            trial.extend_from_slice(&route_stops);
            trial.push(stops[index]);

            let duration = query_duration(oracle, &trial, cancel)?;
            debug!(
                route = routes.len(),
                waypoints = trial.len(),
                duration_s = duration,
                "trial route"
            );

            if duration > options.max_seconds {
                if !route_stops.is_empty() {
                    break;
                }
                warn!(
                    route = routes.len(),
                    duration_s = duration,
                    max_s = options.max_seconds,
                    "single stop exceeds the route budget; keeping it as its own route"
                );
            }

            route_stops.push(stops[index]);
            budgeted_seconds = duration;
            index += 1;
        }

        let finished = index >= stops.len();
        let mut total_seconds = budgeted_seconds;
        let end = if options.return_to_depot_always || finished {
            let mut closed = Vec::with_capacity(route_stops.len() + 2);
            closed.push(start);
            closed.extend_from_slice(&route_stops);
            closed.push(options.depot);
            total_seconds = query_duration(oracle, &closed, cancel)?;
            Some(options.depot)
        } else {
            None
        };

        let route = Route {
            start,
            stops: route_stops,
            end,
            budgeted_seconds,
            total_seconds,
        };
        start = route.last_waypoint();
        routes.push(route);
    }

    Ok(routes)
}

fn query_duration<O>(
    oracle: &O,
    waypoints: &[Coordinate],
    cancel: Option<&CancelToken>,
) -> Result<f64, PlanError>
where
    O: DurationOracle + ?Sized,
{
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(PlanError::Cancelled);
    }
    Ok(oracle.route(waypoints)?.duration_seconds)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::OracleError;
    use crate::polyline::Polyline;
    use crate::traits::RouteEstimate;

    /// 600 seconds per leg, regardless of geography.
    struct PerLegOracle {
        calls: Cell<usize>,
    }

    impl DurationOracle for PerLegOracle {
        fn route(&self, waypoints: &[Coordinate]) -> Result<RouteEstimate, OracleError> {
            self.calls.set(self.calls.get() + 1);
            Ok(RouteEstimate {
                duration_seconds: 600.0 * (waypoints.len() - 1) as f64,
                distance_meters: 0.0,
                geometry: Polyline::default(),
            })
        }
    }

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn options(max_seconds: f64, always: bool) -> SegmentOptions {
        SegmentOptions {
            depot: coord(48.7758, 9.1829),
            max_seconds,
            return_to_depot_always: always,
        }
    }

    fn tour(n: usize) -> Tour {
        Tour::new((0..n).map(|i| coord(48.0 + i as f64 * 0.1, 9.0)).collect())
    }

    #[test]
    fn test_budget_splits_into_consecutive_routes() {
        let oracle = PerLegOracle { calls: Cell::new(0) };
        // Two legs fit in 1200s, so each route takes two stops
        let routes = segment(&tour(5), &options(1200.0, false), &oracle, None).unwrap();

        let sizes: Vec<usize> = routes.iter().map(|r| r.stops.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(routes[1].start, routes[0].stops[1]);
        assert!(!routes[0].returns_to_depot());
        assert!(routes[2].returns_to_depot());
    }

    #[test]
    fn test_rejects_invalid_budget_before_oracle() {
        let oracle = PerLegOracle { calls: Cell::new(0) };
        for max_seconds in [f64::NAN, f64::INFINITY, 0.0, -60.0] {
            let result = segment(&tour(5), &options(max_seconds, false), &oracle, None);
            assert!(
                matches!(result, Err(PlanError::InvalidMaxDuration(_))),
                "budget {} should be rejected",
                max_seconds
            );
        }
        assert_eq!(oracle.calls.get(), 0);
    }

    #[test]
    fn test_cancelled_before_first_call() {
        let oracle = PerLegOracle { calls: Cell::new(0) };
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = segment(&tour(3), &options(7200.0, false), &oracle, Some(&cancel));
        assert!(matches!(result, Err(PlanError::Cancelled)));
        assert_eq!(oracle.calls.get(), 0);
    }

    #[test]
    fn test_last_waypoint() {
        let a = coord(48.0, 9.0);
        let depot = coord(48.7758, 9.1829);
        let open = Route {
            start: depot,
            stops: vec![a],
            end: None,
            budgeted_seconds: 0.0,
            total_seconds: 0.0,
        };
        assert_eq!(open.last_waypoint(), a);
        assert_eq!(open.waypoints(), vec![depot, a]);

        let closed = Route {
            end: Some(depot),
            ..open
        };
        assert_eq!(closed.last_waypoint(), depot);
        assert_eq!(closed.waypoints(), vec![depot, a, depot]);
    }
}
