//! OSRM HTTP adapter for route durations.

use std::env;

use serde::Deserialize;
use tracing::debug;

use crate::error::{OracleError, PlanError};
use crate::geo::Coordinate;
use crate::polyline::Polyline;
use crate::traits::{DurationOracle, RouteEstimate};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Reads `OSRM_BASE_URL`, `OSRM_PROFILE` and `OSRM_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, PlanError> {
        let defaults = Self::default();
        let timeout_secs = match env::var("OSRM_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                PlanError::InvalidConfig(format!("OSRM_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            base_url: env::var("OSRM_BASE_URL").unwrap_or(defaults.base_url),
            profile: env::var("OSRM_PROFILE").unwrap_or(defaults.profile),
            timeout_secs,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    /// Builds a blocking client with the configured request timeout.
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn route_url(&self, waypoints: &[Coordinate]) -> String {
        let coords = waypoints
            .iter()
            .map(|waypoint| format!("{:.6},{:.6}", waypoint.lng(), waypoint.lat()))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl DurationOracle for OsrmClient {
    fn route(&self, waypoints: &[Coordinate]) -> Result<RouteEstimate, OracleError> {
        if waypoints.len() < 2 {
            return Err(OracleError::TooFewWaypoints(waypoints.len()));
        }

        let url = self.route_url(waypoints);
        debug!(waypoints = waypoints.len(), "requesting OSRM route");

        // OSRM reports NoRoute and friends with a 400 and a JSON body, so the
        // body is decoded before looking at the HTTP status.
        let response = self.client.get(url).send()?;
        let status = response.status();
        match response.json::<OsrmRouteResponse>() {
            Ok(body) => body.into_estimate(),
            Err(err) if status.is_success() => Err(OracleError::Http(err)),
            Err(_) => Err(OracleError::Service {
                code: status.to_string(),
                message: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
    distance: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_estimate(self) -> Result<RouteEstimate, OracleError> {
        if self.code != "Ok" {
            return Err(OracleError::Service {
                code: self.code,
                message: self.message,
            });
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(OracleError::EmptyResponse)?;

        let geometry = route
            .geometry
            .map(|geometry| Polyline::from_lng_lat(&geometry.coordinates))
            .unwrap_or_default();

        Ok(RouteEstimate {
            duration_seconds: route.duration,
            distance_meters: route.distance,
            geometry,
        })
    }
}
