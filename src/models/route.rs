// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sweeping route model and its typed geometry.

use geo::{Coord, LineString, MultiLineString, Point, Polygon};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Team shift operating a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Shift {
    #[serde(rename = "matin")]
    Morning,
    #[serde(rename = "soir")]
    Evening,
}

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Équipe matin",
            Shift::Evening => "Équipe soir",
        }
    }
}

impl FromStr for Shift {
    type Err = String;

    /// Accepts French and English names in any casing.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "matin" | "morning" => Ok(Shift::Morning),
            "soir" | "evening" => Ok(Shift::Evening),
            other => Err(format!("unknown shift '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Shift {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Geometry shapes a route may carry.
///
/// Coordinates are held as `geo` types with `x = longitude`, `y = latitude`,
/// the same order GeoJSON uses on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "geojson::Geometry", into = "geojson::Geometry")]
pub enum RouteGeometry {
    LineString(LineString<f64>),
    MultiLineString(MultiLineString<f64>),
    Point(Point<f64>),
    Polygon(Polygon<f64>),
}

impl RouteGeometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            RouteGeometry::LineString(_) => "LineString",
            RouteGeometry::MultiLineString(_) => "MultiLineString",
            RouteGeometry::Point(_) => "Point",
            RouteGeometry::Polygon(_) => "Polygon",
        }
    }
}

/// Errors converting GeoJSON into a [`RouteGeometry`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Unsupported geometry type: {0}")]
    Unsupported(String),

    #[error("Position has {0} components, expected at least 2")]
    ShortPosition(usize),

    #[error("Polygon has no exterior ring")]
    MissingRing,

    #[error("Malformed geometry: {0}")]
    Malformed(String),
}

fn coord(position: &[f64]) -> Result<Coord<f64>, GeometryError> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(GeometryError::ShortPosition(position.len())),
    }
}

fn line(positions: &[Vec<f64>]) -> Result<LineString<f64>, GeometryError> {
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn positions(line: &LineString<f64>) -> Vec<Vec<f64>> {
    line.coords().map(|c| vec![c.x, c.y]).collect()
}

impl TryFrom<geojson::Value> for RouteGeometry {
    type Error = GeometryError;

    fn try_from(value: geojson::Value) -> Result<Self, Self::Error> {
        match value {
            geojson::Value::LineString(coords) => Ok(RouteGeometry::LineString(line(&coords)?)),
            geojson::Value::MultiLineString(lines) => lines
                .iter()
                .map(|l| line(l))
                .collect::<Result<Vec<_>, _>>()
                .map(|ls| RouteGeometry::MultiLineString(MultiLineString::new(ls))),
            geojson::Value::Point(position) => Ok(RouteGeometry::Point(coord(&position)?.into())),
            geojson::Value::Polygon(rings) => {
                let mut rings = rings.iter();
                let exterior = line(rings.next().ok_or(GeometryError::MissingRing)?)?;
                let interiors = rings.map(|r| line(r)).collect::<Result<Vec<_>, _>>()?;
                Ok(RouteGeometry::Polygon(Polygon::new(exterior, interiors)))
            }
            other => Err(GeometryError::Unsupported(other.type_name().to_string())),
        }
    }
}

impl TryFrom<geojson::Geometry> for RouteGeometry {
    type Error = GeometryError;

    fn try_from(geometry: geojson::Geometry) -> Result<Self, Self::Error> {
        geometry.value.try_into()
    }
}

impl From<RouteGeometry> for geojson::Geometry {
    fn from(geometry: RouteGeometry) -> Self {
        let value = match geometry {
            RouteGeometry::LineString(ls) => geojson::Value::LineString(positions(&ls)),
            RouteGeometry::MultiLineString(mls) => {
                geojson::Value::MultiLineString(mls.iter().map(positions).collect())
            }
            RouteGeometry::Point(p) => geojson::Value::Point(vec![p.x(), p.y()]),
            RouteGeometry::Polygon(poly) => {
                let mut rings = vec![positions(poly.exterior())];
                rings.extend(poly.interiors().iter().map(positions));
                geojson::Value::Polygon(rings)
            }
        };
        geojson::Geometry::new(value)
    }
}

/// A street sweeping circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepingRoute {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    pub region: String,
    pub department: String,
    pub commune: String,
    pub shift: Shift,
    pub length_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RouteGeometry>,
}
