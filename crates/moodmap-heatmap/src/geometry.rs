//! Decoding neighborhood geometry text into a center point.

use serde_json::Value;

use crate::error::GeometryError;
use crate::geo::Coordinate;

/// Decode a stored GeoJSON geometry into its center coordinate.
///
/// Only `Point` geometries carry a usable center. Coordinates are read in
/// RFC 7946 `[lng, lat]` order; a third (altitude) member is ignored.
///
/// # Errors
///
/// Returns [`GeometryError`] if the text is not JSON, is not a `Point`, or
/// does not hold two finite numeric coordinates.
pub fn point_center(geometry: &str) -> Result<Coordinate, GeometryError> {
    let value: Value = serde_json::from_str(geometry)?;

    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    if kind != "Point" {
        return Err(GeometryError::NotPoint(kind.to_string()));
    }

    let coordinates = value
        .get("coordinates")
        .and_then(Value::as_array)
        .filter(|c| c.len() >= 2)
        .ok_or(GeometryError::MissingCoordinates)?;

    let lng = finite(&coordinates[0])?;
    let lat = finite(&coordinates[1])?;
    Ok(Coordinate::new(lat, lng))
}

fn finite(value: &Value) -> Result<f64, GeometryError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or(GeometryError::InvalidCoordinate)
}
