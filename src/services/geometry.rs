// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route geometry adaptation for the map renderer.
//!
//! Stored geometry follows GeoJSON `[lon, lat]` order; the renderer wants
//! `[lat, lon]`. Adaptation is one-directional and never fails: anything it
//! cannot draw becomes an empty shape so the rest of the map still renders.

use crate::models::route::RouteGeometry;
use geo::LineString;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A `[lat, lon]` pair as consumed by the renderer.
pub type LatLng = [f64; 2];

/// Renderer-ready shape of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "positions")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum AdaptedShape {
    Path(Vec<LatLng>),
    MultiPath(Vec<Vec<LatLng>>),
    Empty,
}

impl AdaptedShape {
    /// One polyline per drawable path; empty paths are skipped.
    pub fn polylines(&self) -> Vec<Vec<LatLng>> {
        match self {
            AdaptedShape::Path(path) if !path.is_empty() => vec![path.clone()],
            AdaptedShape::MultiPath(paths) => {
                paths.iter().filter(|p| !p.is_empty()).cloned().collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polylines().is_empty()
    }
}

fn swap(line: &LineString<f64>) -> Vec<LatLng> {
    line.coords().map(|c| [c.y, c.x]).collect()
}

/// Adapt a typed route geometry.
///
/// Line strings keep their order, multi line strings keep their nesting.
/// Absent geometry and non-line shapes adapt to [`AdaptedShape::Empty`].
pub fn adapt(geometry: Option<&RouteGeometry>) -> AdaptedShape {
    match geometry {
        Some(RouteGeometry::LineString(line)) => AdaptedShape::Path(swap(line)),
        Some(RouteGeometry::MultiLineString(lines)) => {
            AdaptedShape::MultiPath(lines.iter().map(swap).collect())
        }
        Some(other) => {
            tracing::debug!(geometry = other.type_name(), "Geometry is not drawable as a route");
            AdaptedShape::Empty
        }
        None => AdaptedShape::Empty,
    }
}

/// Adapt untyped GeoJSON geometry (e.g. a hand-off payload).
///
/// Malformed nesting, short positions and unknown types are logged and
/// degrade to [`AdaptedShape::Empty`].
pub fn adapt_value(value: &serde_json::Value) -> AdaptedShape {
    if value.is_null() {
        return AdaptedShape::Empty;
    }

    let geometry = serde_json::from_value::<geojson::Geometry>(value.clone())
        .map_err(|e| e.to_string())
        .and_then(|g| RouteGeometry::try_from(g).map_err(|e| e.to_string()));

    match geometry {
        Ok(geometry) => adapt(Some(&geometry)),
        Err(error) => {
            tracing::warn!(error = %error, "Failed to adapt route geometry, rendering nothing");
            AdaptedShape::Empty
        }
    }
}
