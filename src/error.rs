//! Error types for planning and for the duration oracle.

use std::fmt;

/// Failure reported by a [`DurationOracle`](crate::traits::DurationOracle).
#[derive(Debug)]
pub enum OracleError {
    Http(reqwest::Error),
    /// The service answered, but with a non-`Ok` status code.
    Service {
        code: String,
        message: Option<String>,
    },
    /// The service answered `Ok` without any route.
    EmptyResponse,
    TooFewWaypoints(usize),
    /// Catch-all for oracles that are not HTTP backed.
    Unavailable(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Http(err) => write!(f, "routing request failed: {}", err),
            OracleError::Service { code, message } => match message {
                Some(message) => write!(f, "routing service returned {}: {}", code, message),
                None => write!(f, "routing service returned {}", code),
            },
            OracleError::EmptyResponse => write!(f, "routing service returned no route"),
            OracleError::TooFewWaypoints(count) => {
                write!(f, "a route needs at least 2 waypoints, got {}", count)
            }
            OracleError::Unavailable(reason) => write!(f, "routing unavailable: {}", reason),
        }
    }
}

impl std::error::Error for OracleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OracleError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        OracleError::Http(err)
    }
}

/// Errors that abort a planning invocation.
#[derive(Debug)]
pub enum PlanError {
    InvalidCoordinate { lat: f64, lng: f64 },
    /// Maximum route duration (hours) must be finite and positive.
    InvalidMaxDuration(f64),
    InvalidClusterRadius(f64),
    InvalidConfig(String),
    Oracle(OracleError),
    Cancelled,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidCoordinate { lat, lng } => {
                write!(f, "coordinate out of range: ({}, {})", lat, lng)
            }
            PlanError::InvalidMaxDuration(hours) => {
                write!(f, "maximum route duration must be > 0 hours, got {}", hours)
            }
            PlanError::InvalidClusterRadius(radius) => {
                write!(f, "cluster radius must be >= 0 meters, got {}", radius)
            }
            PlanError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            PlanError::Oracle(_) => write!(f, "duration oracle failed"),
            PlanError::Cancelled => write!(f, "planning was cancelled"),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Oracle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OracleError> for PlanError {
    fn from(err: OracleError) -> Self {
        PlanError::Oracle(err)
    }
}
