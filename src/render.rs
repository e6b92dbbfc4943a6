//! Hand-off to the map display: per-route geometry, colour and deep link.

use reqwest::Url;
use serde::Serialize;

use crate::error::PlanError;
use crate::geo::Coordinate;
use crate::polyline::Polyline;
use crate::segment::Route;
use crate::traits::DurationOracle;

/// Google Maps accepts at most this many intermediate waypoints per link.
pub const MAX_LINK_WAYPOINTS: usize = 20;

/// Line colours, cycled by route index.
pub const ROUTE_COLORS: [&str; 10] = [
    "blue",
    "red",
    "green",
    "purple",
    "orange",
    "darkred",
    "darkblue",
    "darkgreen",
    "darkpurple",
    "cadetblue",
];

const GOOGLE_MAPS_DIRECTIONS: &str = "https://www.google.com/maps/dir/";

/// What the map needs to draw one route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    /// Position of the route in the plan.
    pub index: usize,
    /// Line colour from [`ROUTE_COLORS`].
    pub color: &'static str,
    /// Full route duration as reported by the oracle.
    pub duration_hours: f64,
    /// Drivable path to draw.
    pub geometry: Polyline,
    /// Google Maps directions for the route's waypoints.
    pub maps_link: Option<String>,
}

/// Colour for the route at `index`, cycling through [`ROUTE_COLORS`].
pub fn route_color(index: usize) -> &'static str {
    ROUTE_COLORS[index % ROUTE_COLORS.len()]
}

/// Directions link from the first to the last waypoint.
///
/// Intermediate waypoints are included only when there are at most
/// [`MAX_LINK_WAYPOINTS`] of them; beyond that the link keeps just origin and
/// destination. Returns `None` for an empty waypoint list.
pub fn google_maps_link(waypoints: &[Coordinate]) -> Option<String> {
    let origin = waypoints.first()?;
    let destination = waypoints.last()?;
    let intermediate: &[Coordinate] = if waypoints.len() > 2 {
        &waypoints[1..waypoints.len() - 1]
    } else {
        &[]
    };

    let mut params = vec![
        ("api", "1".to_string()),
        ("origin", format_waypoint(origin)),
        ("destination", format_waypoint(destination)),
    ];
    if !intermediate.is_empty() && intermediate.len() <= MAX_LINK_WAYPOINTS {
        let joined = intermediate
            .iter()
            .map(format_waypoint)
            .collect::<Vec<_>>()
            .join("|");
        params.push(("waypoints", joined));
    }

    Url::parse_with_params(GOOGLE_MAPS_DIRECTIONS, &params)
        .map(String::from)
        .ok()
}

fn format_waypoint(coordinate: &Coordinate) -> String {
    format!("{},{}", coordinate.lat(), coordinate.lng())
}

/// Requests full geometry for every route and builds what the map needs.
pub fn summarize_routes<O>(routes: &[Route], oracle: &O) -> Result<Vec<RouteSummary>, PlanError>
where
    O: DurationOracle + ?Sized,
{
    routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let waypoints = route.waypoints();
            let estimate = oracle.route(&waypoints)?;
            Ok(RouteSummary {
                index,
                color: route_color(index),
                duration_hours: estimate.duration_seconds / 3600.0,
                geometry: estimate.geometry,
                maps_link: google_maps_link(&waypoints),
            })
        })
        .collect()
}
