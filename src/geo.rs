//! Coordinates and survey points.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::traits::Located;

/// Default planning origin and return point (Stuttgart).
pub const DEFAULT_DEPOT: Coordinate = Coordinate {
    lat: 48.7758,
    lng: 9.1829,
};

/// A latitude/longitude pair in decimal degrees.
///
/// Always within [-90, 90] x [-180, 180]; construct via [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Validates ranges; NaN and infinities are rejected.
    pub fn new(lat: f64, lng: f64) -> Result<Self, PlanError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(PlanError::InvalidCoordinate { lat, lng })
        }
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Unweighted mean of a non-empty set of coordinates.
    ///
    /// Returns `None` for an empty iterator. The mean of in-range values is
    /// itself in range, so no validation is needed.
    pub fn mean<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let (mut lat_sum, mut lng_sum, mut count) = (0.0, 0.0, 0usize);
        for coordinate in coordinates {
            lat_sum += coordinate.lat;
            lng_sum += coordinate.lng;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            lat: lat_sum / count as f64,
            lng: lng_sum / count as f64,
        })
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = PlanError;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Coordinate::new(lat, lng)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.lat, coordinate.lng)
    }
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// A surveyed point: a coordinate plus caller attributes the planner never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<A = ()> {
    pub coordinate: Coordinate,
    pub attributes: A,
}

impl<A> Point<A> {
    pub fn new(coordinate: Coordinate, attributes: A) -> Self {
        Self {
            coordinate,
            attributes,
        }
    }
}

impl<A> Located for Point<A> {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
