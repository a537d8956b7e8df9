//! Normalisation of upstream subscription records into positioned groups.
//!
//! The upstream API and its archived snapshots disagree on field names and
//! position shapes, so each accessor tries several spellings in a fixed
//! priority order. Nothing here fails: unusable input yields `None`.

use serde::Serialize;
use serde_json::Value;

use crate::geo::Point;

const LAT_KEYS: [&str; 2] = ["lat", "latitude"];
const LNG_KEYS: [&str; 4] = ["lng", "lon", "long", "longitude"];
const ID_KEYS: [&str; 4] = ["id", "slug", "code", "name"];
const NAME_KEYS: [&str; 3] = ["name", "title", "group"];
const UNKNOWN_NAME: &str = "Unknown";

/// One subscribed group with a resolved map position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedGroup {
    pub id: String,
    pub name: String,
    pub position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accomodation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber_addition: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
}

/// Coerce a JSON number or numeric string to a finite `f64`.
///
/// Strings may use `,` as the decimal mark (`"52,1"`).
#[must_use]
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn first_coercible(object: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| object.get(key).and_then(coerce_f64))
}

fn lat_lng_fields(object: &Value) -> Option<Point> {
    let lat = first_coercible(object, &LAT_KEYS)?;
    let lng = first_coercible(object, &LNG_KEYS)?;
    Some(Point::new(lat, lng))
}

/// GeoJSON order: `[lng, lat, ...]`.
fn geojson_coordinates(location: &Value) -> Option<Point> {
    let coords = location.get("coordinates")?.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    let lng = coerce_f64(&coords[0])?;
    let lat = coerce_f64(&coords[1])?;
    Some(Point::new(lat, lng))
}

/// `"lat,lng"` text.
fn coordinate_string(record: &Value) -> Option<Point> {
    let text = record.get("coordinates")?.as_str()?;
    let (lat, lng) = text.split_once(',')?;
    let lat = coerce_f64(&Value::String(lat.to_owned()))?;
    let lng = coerce_f64(&Value::String(lng.to_owned()))?;
    Some(Point::new(lat, lng))
}

/// Resolve the map position of a raw record.
///
/// Tried in order, first hit wins:
/// 1. top-level `lat`/`latitude` with `lng`/`lon`/`long`/`longitude`
/// 2. the same pair under a nested `location` object
/// 3. `location.coordinates` as a GeoJSON `[lng, lat]` array
/// 4. a top-level `coordinates` string `"lat,lng"`
#[must_use]
pub fn extract_position(record: &Value) -> Option<Point> {
    if !record.is_object() {
        return None;
    }

    let location = record.get("location").filter(|v| v.is_object());

    lat_lng_fields(record)
        .or_else(|| location.and_then(lat_lng_fields))
        .or_else(|| location.and_then(geojson_coordinates))
        .or_else(|| coordinate_string(record))
}

fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_identity(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(key).and_then(identity_string))
}

/// Opaque key for records without a natural one. Differs on every call.
fn random_group_id() -> String {
    format!("group-{:016x}", rand::random::<u64>())
}

fn detail(record: &Value, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

/// Build a [`ParsedGroup`] from one raw record, or `None` without a position.
#[must_use]
pub fn parse_group(record: &Value) -> Option<ParsedGroup> {
    let position = extract_position(record)?;

    Some(ParsedGroup {
        id: first_identity(record, &ID_KEYS).unwrap_or_else(random_group_id),
        name: first_identity(record, &NAME_KEYS).unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
        position,
        accomodation: detail(record, "accomodation"),
        street: detail(record, "street"),
        housenumber: detail(record, "housenumber"),
        housenumber_addition: detail(record, "housenumber_addition"),
        postcode: detail(record, "postcode"),
        city: detail(record, "city"),
    })
}

/// The record array inside a response body: its `data` field, or the body
/// itself when it is an array. Anything else holds no records.
#[must_use]
pub fn record_list(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(Value::as_array)
        .or_else(|| body.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Parse every record of a response body, dropping those without a position.
#[must_use]
pub fn parse_groups(body: &Value) -> Vec<ParsedGroup> {
    let records = record_list(body);
    let groups: Vec<ParsedGroup> = records.iter().filter_map(parse_group).collect();

    let dropped = records.len() - groups.len();
    if dropped > 0 {
        tracing::debug!(
            total = records.len(),
            dropped,
            "skipped records without a resolvable position"
        );
    }

    groups
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
