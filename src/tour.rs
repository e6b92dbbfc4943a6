//! Single-vehicle tour construction and improvement.
//!
//! A tour is an open path starting at the depot; the depot itself is never a
//! member. Costs are straight-line meters, measured depot -> first -> ... -> last.

use tracing::{debug, warn};

use crate::geo::Coordinate;
use crate::haversine::{DistanceMatrix, distance};

/// Upper bound on full 2-opt passes, to bound runtime on adversarial inputs.
pub const MAX_TWO_OPT_PASSES: usize = 1_000;

/// Ordered visiting sequence over (clustered) stops, depot excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tour {
    stops: Vec<Coordinate>,
}

impl Tour {
    /// Wraps stops that are already in visiting order.
    pub fn new(stops: Vec<Coordinate>) -> Self {
        Self { stops }
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[Coordinate] {
        &self.stops
    }

    /// Consumes the tour and returns the owned stops.
    pub fn into_stops(self) -> Vec<Coordinate> {
        self.stops
    }

    /// Number of stops, depot excluded.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Open path length in meters from `depot` through every stop.
    pub fn path_length(&self, depot: Coordinate) -> f64 {
        let mut current = depot;
        let mut total = 0.0;
        for stop in &self.stops {
            total += distance(current, *stop);
            current = *stop;
        }
        total
    }
}

impl From<Vec<Coordinate>> for Tour {
    fn from(stops: Vec<Coordinate>) -> Self {
        Self::new(stops)
    }
}

/// Nearest-neighbor construction anchored at `depot`.
///
/// Ties go to the earliest remaining point, so the result is deterministic.
/// Duplicate coordinates are kept as separate stops.
pub fn build(depot: Coordinate, points: &[Coordinate]) -> Tour {
    let mut remaining = points.to_vec();
    let mut stops = Vec::with_capacity(points.len());
    let mut current = depot;

    while !remaining.is_empty() {
        let mut nearest_index = 0;
        let mut nearest_dist = f64::INFINITY;
        for (index, candidate) in remaining.iter().enumerate() {
            let dist = distance(current, *candidate);
            if dist < nearest_dist {
                nearest_dist = dist;
                nearest_index = index;
            }
        }

        let next = remaining.remove(nearest_index);
        stops.push(next);
        current = next;
    }

    Tour::new(stops)
}

/// 2-opt: reverse `tour[i..=k]` whenever that shortens the depot-anchored path.
///
/// Every improving reversal found during a pass is kept and the scan carries
/// on against the improved order. Passes repeat until one finds nothing, or
/// until [`MAX_TWO_OPT_PASSES`] is reached.
pub fn improve(tour: Tour, depot: Coordinate) -> Tour {
    let n = tour.len();
    if n < 2 {
        return tour;
    }

    // Index 0 is the depot, stops follow in tour order.
    let mut locations = Vec::with_capacity(n + 1);
    locations.push(depot);
    locations.extend_from_slice(tour.stops());
    let matrix = DistanceMatrix::from_coordinates(&locations);

    let mut order: Vec<usize> = (1..=n).collect();
    let initial = path_length(&order, &matrix);
    let mut best = initial;
    let mut passes = 0;

    loop {
        if passes == MAX_TWO_OPT_PASSES {
            warn!(passes, "2-opt stopped at pass limit before converging");
            break;
        }
        passes += 1;

        let mut improved = false;
        for i in 0..n - 1 {
            for k in i + 1..n {
                order[i..=k].reverse();
                let length = path_length(&order, &matrix);
                if length < best {
                    best = length;
                    improved = true;
                } else {
                    order[i..=k].reverse();
                }
            }
        }

        debug!(pass = passes, length_m = best, "2-opt pass finished");
        if !improved {
            break;
        }
    }

    debug!(
        stops = n,
        passes,
        initial_m = initial,
        improved_m = best,
        "2-opt converged"
    );

    Tour::new(order.into_iter().map(|index| locations[index]).collect())
}

fn path_length(order: &[usize], matrix: &DistanceMatrix) -> f64 {
    let mut previous = 0;
    let mut total = 0.0;
    for &index in order {
        total += matrix.get(previous, index);
        previous = index;
    }
    total
}
