//! Input normalization: four accepted data shapes → canonical `Vec<Series>`.
//!
//! The original dynamic API sniffed input shapes ad hoc; here the accepted
//! shapes are an explicit tagged union, with [`normalize_json`] performing the
//! same structural detection for JSON-like callers. Malformed business data
//! is absorbed — normalization never errors, it degrades to an empty series
//! collection.

use chrono::DateTime;
use serde_json::Value;
use tracing::debug;

use crate::data::series::{Point, Series, SeriesOptions};

/// The input shapes accepted by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChartInput {
    /// Flat run of values: one series, one subseries, one point per value.
    Values(Vec<f64>),
    /// A single series given as one run of points plus optional options.
    Single {
        points: Vec<Point>,
        options: Option<SeriesOptions>,
    },
    /// Bare points with no series wrapper.
    Points(Vec<Point>),
    /// Already-canonical series collection.
    Series(Vec<Series>),
}

impl From<Vec<f64>> for ChartInput {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values)
    }
}

impl From<Vec<Point>> for ChartInput {
    fn from(points: Vec<Point>) -> Self {
        Self::Points(points)
    }
}

impl From<Vec<Series>> for ChartInput {
    fn from(series: Vec<Series>) -> Self {
        Self::Series(series)
    }
}

/// Produces the canonical series collection for any accepted input shape.
///
/// Every returned series holds points inside `subseries` vectors (never bare
/// value arrays), preserving point order and values exactly. Empty input
/// yields an empty collection.
#[must_use]
pub fn normalize(input: ChartInput) -> Vec<Series> {
    normalize_with(input, SeriesOptions::default())
}

/// Like [`normalize`], with global series defaults stamped onto every shape
/// that carries no options of its own (`Values`, `Points`, `Single` without
/// options). A shape with explicit options overrides the defaults wholesale.
#[must_use]
pub fn normalize_with(input: ChartInput, defaults: SeriesOptions) -> Vec<Series> {
    let series = match input {
        ChartInput::Values(values) => {
            if values.is_empty() {
                Vec::new()
            } else {
                let points = values.into_iter().map(Point::from_value).collect();
                let mut series = Series::from_points(points);
                series.options = defaults;
                vec![series]
            }
        }
        ChartInput::Single { points, options } => {
            if points.is_empty() {
                Vec::new()
            } else {
                let mut series = Series::from_points(points);
                series.options = options.unwrap_or(defaults);
                vec![series]
            }
        }
        ChartInput::Points(points) => {
            if points.is_empty() {
                Vec::new()
            } else {
                let mut series = Series::from_points(points);
                series.options = defaults;
                vec![series]
            }
        }
        ChartInput::Series(series) => series,
    };

    debug!(series_count = series.len(), "normalized chart input");
    series
}

/// Structural sniffing for JSON-like input, preserving the four dynamic
/// shapes of the original API:
///
/// - array of numbers/nulls → one series, one subseries;
/// - object with a `subseries` field → one series (nested arrays become
///   multiple subseries);
/// - array of point objects without a `subseries` field → one series;
/// - array of objects with `subseries` fields → canonical series collection.
///
/// Anything ambiguous or malformed yields an empty collection; this function
/// never errors on business data.
#[must_use]
pub fn normalize_json(value: &Value) -> Vec<Series> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Vec::new();
            }
            if items.iter().all(is_scalar_value) {
                let points = items.iter().map(json_point_from_scalar).collect();
                return normalize(ChartInput::Points(points));
            }
            if items
                .iter()
                .all(|item| item.as_object().is_some_and(|obj| obj.contains_key("subseries")))
            {
                let series = items.iter().filter_map(json_series).collect();
                return normalize(ChartInput::Series(series));
            }
            if items.iter().all(|item| item.is_object()) {
                let points = items.iter().map(json_point).collect();
                return normalize(ChartInput::Points(points));
            }
            Vec::new()
        }
        Value::Object(obj) if obj.contains_key("subseries") => {
            json_series(value).map_or_else(Vec::new, |series| normalize(ChartInput::Series(vec![series])))
        }
        _ => Vec::new(),
    }
}

fn is_scalar_value(value: &Value) -> bool {
    value.is_number() || value.is_null()
}

fn json_point_from_scalar(value: &Value) -> Point {
    match value.as_f64() {
        Some(number) if number.is_finite() => Point::from_value(number),
        _ => Point::gap(),
    }
}

fn json_point(value: &Value) -> Point {
    if is_scalar_value(value) {
        return json_point_from_scalar(value);
    }

    let Some(obj) = value.as_object() else {
        return Point::gap();
    };

    Point {
        value: obj.get("value").and_then(Value::as_f64).filter(|v| v.is_finite()),
        date: obj.get("date").and_then(json_timestamp),
        start_date: obj.get("startDate").and_then(json_timestamp),
        end_date: obj.get("endDate").and_then(json_timestamp),
        click_target: obj
            .get("clickTarget")
            .and_then(Value::as_str)
            .map(str::to_owned),
        flag: obj
            .get("pointFlag")
            .and_then(Value::as_str)
            .map(str::to_owned),
    }
}

fn json_timestamp(value: &Value) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Some(text) = value.as_str() {
        return DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.to_utc());
    }
    // Bare numbers are unix milliseconds.
    value
        .as_i64()
        .and_then(|millis| DateTime::from_timestamp_millis(millis))
}

fn json_series(value: &Value) -> Option<Series> {
    let obj = value.as_object()?;
    let subseries_value = obj.get("subseries")?.as_array()?;

    let subseries: Vec<Vec<Point>> = if subseries_value.iter().all(Value::is_array) {
        subseries_value
            .iter()
            .filter_map(Value::as_array)
            .map(|run| run.iter().map(json_point).collect())
            .collect()
    } else {
        // Non-nested subseries is a single run of points.
        vec![subseries_value.iter().map(json_point).collect()]
    };

    let options = obj
        .get("options")
        .and_then(|raw| serde_json::from_value::<SeriesOptions>(raw.clone()).ok())
        .unwrap_or_default();

    Some(Series { subseries, options })
}
