// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Coordinate;

/// Drawn walkable paths of a single floor, as kept by a [RouteStore](super::RouteStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub floor: String,
    pub geojson: FeatureCollection,
}

/// A [GeoJSON FeatureCollection](https://datatracker.ietf.org/doc/html/rfc7946#section-3.3).
///
/// Deserialization never fails on the contents of a feature list: missing or `null` lists
/// are treated as empty, entries which aren't objects become features without a geometry,
/// and geometries are only interpreted when building graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub type_: String,

    #[serde(default, deserialize_with = "lenient_features")]
    pub features: Vec<Feature>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self {
            type_: feature_collection_type(),
            features: Vec::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// `None` for missing or `null` geometries, and for geometries which aren't objects.
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<Geometry>,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub properties: Value,
}

/// A GeoJSON geometry with uninterpreted coordinates.
///
/// A missing or non-string `type` is kept as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub type_: String,

    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Creates a LineString geometry from `(lat, lon)` pairs.
    pub fn line_string(coordinates: &[Coordinate]) -> Self {
        let positions: Vec<[f64; 2]> = coordinates.iter().map(|c| [c.lon, c.lat]).collect();
        Self {
            type_: "LineString".to_string(),
            coordinates: serde_json::json!(positions),
        }
    }

    /// Returns the raw position arrays of all lines in this geometry.
    /// `LineString` geometries have one line, `MultiLineString` any number of lines,
    /// and all other geometry types have none.
    pub fn lines(&self) -> Vec<&[Value]> {
        match (self.type_.as_str(), &self.coordinates) {
            ("LineString", Value::Array(positions)) => vec![positions.as_slice()],
            ("MultiLineString", Value::Array(lines)) => lines
                .iter()
                .filter_map(|line| line.as_array().map(|positions| positions.as_slice()))
                .collect(),
            _ => Vec::default(),
        }
    }

    /// Returns `true` if this geometry has a usable `type`.
    pub fn has_type(&self) -> bool {
        !self.type_.is_empty()
    }
}

/// Parses GeoJSON positions (`[lon, lat, ...]`) into [Coordinates](Coordinate).
/// Returns `None` if any of the positions is malformed.
pub fn parse_positions(positions: &[Value]) -> Option<Vec<Coordinate>> {
    positions.iter().map(parse_position).collect()
}

fn parse_position(position: &Value) -> Option<Coordinate> {
    let position = position.as_array()?;
    let lon = position.first()?.as_f64()?;
    let lat = position.get(1)?.as_f64()?;
    Some(Coordinate { lat, lon })
}

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn lenient_features<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Feature>, D::Error> {
    let features = match Value::deserialize(deserializer)? {
        Value::Array(features) => features
            .into_iter()
            .map(|f| serde_json::from_value(f).unwrap_or_default())
            .collect(),
        _ => Vec::default(),
    };
    Ok(features)
}

fn lenient_geometry<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Geometry>, D::Error> {
    match Value::deserialize(deserializer)? {
        geometry @ Value::Object(_) => Ok(serde_json::from_value(geometry).ok()),
        _ => Ok(None),
    }
}

fn lenient_string<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::default()),
    }
}
