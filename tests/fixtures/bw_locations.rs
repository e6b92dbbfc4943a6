//! Real Baden-Württemberg locations for realistic test fixtures.
//!
//! Town centres taken from OpenStreetMap; all are routable with the
//! Geofabrik `europe/germany/baden-wuerttemberg` extract.

use tour_planner::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng).expect("fixture coordinates are valid")
    }
}

pub const STUTTGART: Location = Location::new("Stuttgart", 48.7758, 9.1829);

// Pairs within a few kilometres of each other, merged by a 4 km radius.
pub const ESSLINGEN: Location = Location::new("Esslingen am Neckar", 48.7394, 9.3047);
pub const ESSLINGEN_ZELL: Location = Location::new("Esslingen-Zell", 48.7280, 9.3410);

pub const TOWNS: &[Location] = &[
    Location::new("Ludwigsburg", 48.8975, 9.1922),
    Location::new("Böblingen", 48.6856, 9.0115),
    Location::new("Waiblingen", 48.8303, 9.3169),
    Location::new("Göppingen", 48.7025, 9.6528),
    Location::new("Heilbronn", 49.1427, 9.2109),
    Location::new("Tübingen", 48.5216, 9.0576),
    Location::new("Reutlingen", 48.4914, 9.2043),
    Location::new("Pforzheim", 48.8922, 8.6946),
    Location::new("Karlsruhe", 49.0069, 8.4037),
    Location::new("Schwäbisch Gmünd", 48.7996, 9.7977),
    Location::new("Aalen", 48.8378, 10.0933),
    Location::new("Ulm", 48.4011, 9.9876),
    Location::new("Heidelberg", 49.3988, 8.6724),
    Location::new("Freiburg im Breisgau", 47.9990, 7.8421),
];

pub fn coordinates(locations: &[Location]) -> Vec<Coordinate> {
    locations.iter().map(Location::coordinate).collect()
}
