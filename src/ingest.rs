//! Turning raw survey rows into planner points.
//!
//! Rows carry `lat` and `lng` columns plus anything else the survey sheet
//! had; the extra columns ride along as opaque attributes. Rows that cannot
//! yield a valid coordinate are skipped and reported, never fatal.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::geo::{Coordinate, Point};

pub const LAT_FIELD: &str = "lat";
pub const LNG_FIELD: &str = "lng";

/// Columns of a row other than the coordinates.
pub type Attributes = BTreeMap<String, Value>;

/// How coordinate cells are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinateFormat {
    /// Plain decimal degrees.
    #[default]
    Decimal,
    /// Digits with the decimal point left out, e.g. `487758` for 48.7758.
    ///
    /// Latitude gets the point after two digits. Longitude gets it after two
    /// digits when the first digit is 0 or 1 and after one digit otherwise.
    /// Cells that already contain a point are read as decimals.
    ImpliedDecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Lat,
    Lng,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Missing(&'static str),
    NotNumeric { field: &'static str, value: String },
    OutOfRange { lat: f64, lng: f64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing(field) => write!(f, "missing {}", field),
            SkipReason::NotNumeric { field, value } => {
                write!(f, "{} is not a number: {}", field, value)
            }
            SkipReason::OutOfRange { lat, lng } => {
                write!(f, "coordinate out of range: ({}, {})", lat, lng)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 1-based row number.
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub points: Vec<Point<Attributes>>,
    pub skipped: Vec<SkippedRecord>,
}

/// Converts rows into points, skipping and reporting unusable rows.
pub fn ingest_records<I>(records: I, format: CoordinateFormat) -> Ingested
where
    I: IntoIterator<Item = Attributes>,
{
    let mut ingested = Ingested::default();

    for (index, mut record) in records.into_iter().enumerate() {
        let row = index + 1;
        match read_coordinate(&record, format) {
            Ok(coordinate) => {
                record.remove(LAT_FIELD);
                record.remove(LNG_FIELD);
                ingested.points.push(Point::new(coordinate, record));
            }
            Err(reason) => {
                warn!(row, %reason, "skipping record");
                ingested.skipped.push(SkippedRecord { row, reason });
            }
        }
    }

    ingested
}

/// Parses a JSON array of row objects, then ingests it.
pub fn ingest_json(text: &str, format: CoordinateFormat) -> Result<Ingested, serde_json::Error> {
    let records: Vec<Attributes> = serde_json::from_str(text)?;
    Ok(ingest_records(records, format))
}

fn read_coordinate(record: &Attributes, format: CoordinateFormat) -> Result<Coordinate, SkipReason> {
    let lat = read_axis(record, Axis::Lat, format)?;
    let lng = read_axis(record, Axis::Lng, format)?;
    Coordinate::new(lat, lng).map_err(|_| SkipReason::OutOfRange { lat, lng })
}

fn read_axis(record: &Attributes, axis: Axis, format: CoordinateFormat) -> Result<f64, SkipReason> {
    let field = match axis {
        Axis::Lat => LAT_FIELD,
        Axis::Lng => LNG_FIELD,
    };

    let raw = match record.get(field) {
        None | Some(Value::Null) => return Err(SkipReason::Missing(field)),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => {
            return Err(SkipReason::NotNumeric {
                field,
                value: other.to_string(),
            });
        }
    };
    if raw.is_empty() {
        return Err(SkipReason::Missing(field));
    }

    let text = match format {
        CoordinateFormat::Decimal => raw.clone(),
        CoordinateFormat::ImpliedDecimal => insert_decimal_point(&raw, axis),
    };

    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(SkipReason::NotNumeric { field, value: raw })
}

fn insert_decimal_point(raw: &str, axis: Axis) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    if digits.contains('.') || !digits.chars().all(|c| c.is_ascii_digit()) {
        return raw.to_string();
    }

    let split = match axis {
        Axis::Lat => 2,
        Axis::Lng if digits.starts_with(['0', '1']) => 2,
        Axis::Lng => 1,
    };
    if digits.len() <= split {
        return raw.to_string();
    }

    format!("{}{}.{}", sign, &digits[..split], &digits[split..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Attributes {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decimal_rows_keep_attributes() {
        let ingested = ingest_records(
            vec![row(json!({"lat": 48.7758, "lng": "9.1829", "Schule": "Gymnasium"}))],
            CoordinateFormat::Decimal,
        );

        assert!(ingested.skipped.is_empty());
        let point = &ingested.points[0];
        assert_eq!(point.coordinate, Coordinate::new(48.7758, 9.1829).unwrap());
        assert_eq!(point.attributes.get("Schule"), Some(&json!("Gymnasium")));
        assert!(!point.attributes.contains_key(LAT_FIELD));
    }

    #[test]
    fn test_implied_decimal_digits() {
        assert_eq!(insert_decimal_point("487758", Axis::Lat), "48.7758");
        assert_eq!(insert_decimal_point("91829", Axis::Lng), "9.1829");
        assert_eq!(insert_decimal_point("101234", Axis::Lng), "10.1234");
        assert_eq!(insert_decimal_point("48.7758", Axis::Lat), "48.7758");
        assert_eq!(insert_decimal_point("-337", Axis::Lat), "-33.7");
    }

    #[test]
    fn test_implied_decimal_from_numbers() {
        let ingested = ingest_records(
            vec![row(json!({"lat": 487758, "lng": 91829}))],
            CoordinateFormat::ImpliedDecimal,
        );
        assert_eq!(
            ingested.points[0].coordinate,
            Coordinate::new(48.7758, 9.1829).unwrap()
        );
    }

    #[test]
    fn test_bad_rows_are_reported_not_fatal() {
        let ingested = ingest_records(
            vec![
                row(json!({"lat": 48.7, "lng": 9.1})),
                row(json!({"lat": "", "lng": 9.1})),
                row(json!({"lat": "abc", "lng": 9.1})),
                row(json!({"lat": 148.7, "lng": 9.1})),
                row(json!({"name": "no coordinates"})),
            ],
            CoordinateFormat::Decimal,
        );

        assert_eq!(ingested.points.len(), 1);
        let rows: Vec<usize> = ingested.skipped.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![2, 3, 4, 5]);
        assert_eq!(ingested.skipped[0].reason, SkipReason::Missing(LAT_FIELD));
        assert!(matches!(
            ingested.skipped[1].reason,
            SkipReason::NotNumeric { field: "lat", .. }
        ));
        assert!(matches!(
            ingested.skipped[2].reason,
            SkipReason::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_ingest_json() {
        let ingested = ingest_json(
            r#"[{"lat": "48.78", "lng": "9.18"}, {"lat": null, "lng": "9.18"}]"#,
            CoordinateFormat::Decimal,
        )
        .unwrap();
        assert_eq!(ingested.points.len(), 1);
        assert_eq!(ingested.skipped.len(), 1);
        assert!(ingest_json("not json", CoordinateFormat::Decimal).is_err());
    }
}
