//! Polyline representation for route geometries.
//!
//! The oracle hands geometry back as decoded coordinates; the planner
//! never inspects it, it only passes it on to whoever draws the route.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a polyline from decoded coordinates.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Builds a polyline from GeoJSON `[lng, lat]` positions.
    ///
    /// Positions outside the valid coordinate range are dropped.
    pub fn from_lng_lat(positions: &[[f64; 2]]) -> Self {
        let points = positions
            .iter()
            .filter_map(|[lng, lat]| Coordinate::new(*lat, *lng).ok())
            .collect();
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
