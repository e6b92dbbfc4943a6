//! Planning pipeline: cluster, order, improve, split.

use std::env;

use tracing::info;

use crate::cluster::{DEFAULT_CLUSTER_RADIUS_M, cluster};
use crate::error::PlanError;
use crate::geo::{Coordinate, DEFAULT_DEPOT};
use crate::segment::{CancelToken, Route, SegmentOptions, segment};
use crate::tour::{Tour, build, improve};
use crate::traits::{DurationOracle, Located};

/// Configuration for one planning run.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Start and return point of every route.
    pub depot: Coordinate,
    /// Points closer than this to a cluster seed are merged into one stop.
    pub cluster_radius_m: f64,
    /// Maximum duration of a single route in hours.
    pub max_hours: f64,
    /// Return to the depot after every route, not only the last one.
    pub return_to_depot_always: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            depot: DEFAULT_DEPOT,
            cluster_radius_m: DEFAULT_CLUSTER_RADIUS_M,
            max_hours: 8.0,
            return_to_depot_always: false,
        }
    }
}

impl PlanOptions {
    /// Defaults overlaid with `PLANNER_DEPOT_LAT`, `PLANNER_DEPOT_LNG`,
    /// `PLANNER_CLUSTER_RADIUS_M`, `PLANNER_MAX_HOURS` and
    /// `PLANNER_RETURN_TO_DEPOT`.
    pub fn from_env() -> Result<Self, PlanError> {
        let defaults = Self::default();

        let depot = Coordinate::new(
            env_f64("PLANNER_DEPOT_LAT")?.unwrap_or(defaults.depot.lat()),
            env_f64("PLANNER_DEPOT_LNG")?.unwrap_or(defaults.depot.lng()),
        )?;

        let return_to_depot_always = match env::var("PLANNER_RETURN_TO_DEPOT") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(PlanError::InvalidConfig(format!(
                        "PLANNER_RETURN_TO_DEPOT is not a boolean: {raw}"
                    )));
                }
            },
            Err(_) => defaults.return_to_depot_always,
        };

        let options = Self {
            depot,
            cluster_radius_m: env_f64("PLANNER_CLUSTER_RADIUS_M")?
                .unwrap_or(defaults.cluster_radius_m),
            max_hours: env_f64("PLANNER_MAX_HOURS")?.unwrap_or(defaults.max_hours),
            return_to_depot_always,
        };
        options.validate()?;
        Ok(options)
    }

    /// Rejects a non-positive or non-finite duration and a negative radius.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.max_hours.is_finite() || self.max_hours <= 0.0 {
            return Err(PlanError::InvalidMaxDuration(self.max_hours));
        }
        if !self.cluster_radius_m.is_finite() || self.cluster_radius_m < 0.0 {
            return Err(PlanError::InvalidClusterRadius(self.cluster_radius_m));
        }
        Ok(())
    }

    /// Route budget in seconds.
    pub fn max_seconds(&self) -> f64 {
        self.max_hours * 3600.0
    }

    fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            depot: self.depot,
            max_seconds: self.max_seconds(),
            return_to_depot_always: self.return_to_depot_always,
        }
    }
}

fn env_f64(name: &str) -> Result<Option<f64>, PlanError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PlanError::InvalidConfig(format!("{name} is not a number: {raw}"))),
        Err(_) => Ok(None),
    }
}

/// Result of one planning invocation.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Improved visiting order over the clustered stops.
    pub tour: Tour,
    pub routes: Vec<Route>,
}

/// Plans duration-bounded routes over `points`.
///
/// Pure with respect to the planner: nothing is retained between calls. The
/// oracle is only consulted while splitting, and its first failure aborts the
/// whole plan.
pub fn plan<P, O>(
    points: &[P],
    options: &PlanOptions,
    oracle: &O,
    cancel: Option<&CancelToken>,
) -> Result<Plan, PlanError>
where
    P: Located,
    O: DurationOracle + ?Sized,
{
    options.validate()?;

    let stops = cluster(points, options.cluster_radius_m);
    info!(
        points = points.len(),
        stops = stops.len(),
        radius_m = options.cluster_radius_m,
        "planning routes"
    );

    let tour = improve(build(options.depot, &stops), options.depot);
    let routes = segment(&tour, &options.segment_options(), oracle, cancel)?;

    info!(
        routes = routes.len(),
        max_hours = options.max_hours,
        return_to_depot_always = options.return_to_depot_always,
        "planned routes"
    );

    Ok(Plan { tour, routes })
}
