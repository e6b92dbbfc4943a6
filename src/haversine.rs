//! Great-circle distance.
//!
//! Straight-line distance is only used for clustering and ordering
//! decisions; real travel times come from the duration oracle.

use rayon::prelude::*;

use crate::geo::Coordinate;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates in meters.
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat().to_radians();
    let lat2_rad = to.lat().to_radians();
    let delta_lat = (to.lat() - from.lat()).to_radians();
    let delta_lng = (to.lng() - from.lng()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Pairwise haversine distances, indexed by the order of the input coordinates.
///
/// Rows are computed in parallel; local search reads the matrix many times
/// per pass.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    meters: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Computes every pairwise distance for `locations`.
    pub fn from_coordinates(locations: &[Coordinate]) -> Self {
        let meters = locations
            .par_iter()
            .map(|from| locations.iter().map(|to| distance(*from, *to)).collect())
            .collect();
        Self { meters }
    }

    pub fn len(&self) -> usize {
        self.meters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }

    /// Distance in meters from location `from` to location `to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.meters[from][to]
    }
}
