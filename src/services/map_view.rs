// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map composition: assembles everything the map surface draws into one
//! serializable render model.

use crate::error::AppError;
use crate::models::{CollectionPoint, Layer, SweepingRoute};
use crate::services::fill_level::FillLevel;
use crate::services::geometry::{adapt, LatLng};
use crate::services::layers::{sources, LayerRegistry, Legend};
use crate::time_utils::format_fr_datetime;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

pub const ROUTE_COLOR: &str = "#10B981";
pub const ROUTE_WEIGHT: f32 = 4.0;
pub const ROUTE_OPACITY: f64 = 0.8;

/// Width of the scale bar in screen pixels.
pub const SCALE_REFERENCE_PX: f64 = 100.0;
const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;
const TILE_SIZE_PX: f64 = 256.0;
const MAX_ZOOM: u8 = 22;

/// View configuration for one map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub show_legend: bool,
    pub show_north_arrow: bool,
    pub show_scale: bool,
    pub show_logo: bool,
}

impl MapOptions {
    pub fn new(center: (f64, f64), zoom: u8) -> Self {
        Self {
            center: [center.0, center.1],
            zoom: zoom.min(MAX_ZOOM),
            show_legend: true,
            show_north_arrow: true,
            show_scale: true,
            show_logo: true,
        }
    }
}

/// Everything [`compose`] draws from.
pub struct MapInputs<'a> {
    /// Outcome of the upstream point load; failures render no markers.
    pub points: Result<Vec<CollectionPoint>, AppError>,
    pub selected_route: Option<&'a SweepingRoute>,
    pub layers: &'a LayerRegistry,
    pub options: &'a MapOptions,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FillBar {
    pub level: FillLevel,
    /// Bar width, 0-100
    pub width_pct: f64,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Popup {
    pub title: String,
    /// "{kind} - {waste type}"
    pub subtitle: String,
    pub fill: FillBar,
    pub last_collection: String,
    pub capacity: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    pub id: String,
    pub position: LatLng,
    pub opacity: f64,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PathStyle {
    pub color: String,
    pub weight: f32,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Polyline {
    pub positions: Vec<LatLng>,
    pub style: PathStyle,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteOverlay {
    pub route_id: String,
    pub name: String,
    pub polylines: Vec<Polyline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScaleBar {
    pub reference_px: f64,
    pub meters: f64,
    pub label: String,
}

impl ScaleBar {
    /// Ground distance covered by [`SCALE_REFERENCE_PX`] at the given
    /// latitude and zoom (Web Mercator).
    pub fn at(latitude: f64, zoom: u8) -> Self {
        let zoom = zoom.min(MAX_ZOOM);
        let meters_per_px = EARTH_CIRCUMFERENCE_M * latitude.to_radians().cos()
            / (TILE_SIZE_PX * 2f64.powi(zoom as i32));
        let meters = meters_per_px * SCALE_REFERENCE_PX;

        Self {
            reference_px: SCALE_REFERENCE_PX,
            meters,
            label: format_distance(meters),
        }
    }
}

/// "1.8 km" from 1000 m up, "250 m" below.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round())
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Overlays {
    pub legend: Option<Legend>,
    pub scale: Option<ScaleBar>,
    pub north_arrow: bool,
    pub logo: bool,
}

/// Render model of the whole map surface.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapComposition {
    pub base_layer: TileLayer,
    pub center: LatLng,
    pub zoom: u8,
    pub layers: Vec<Layer>,
    pub markers: Vec<Marker>,
    pub route: Option<RouteOverlay>,
    pub overlays: Overlays,
}

impl MapComposition {
    /// Total number of route polylines drawn.
    pub fn polyline_count(&self) -> usize {
        self.route.as_ref().map_or(0, |r| r.polylines.len())
    }
}

/// Render a number without a trailing `.0` for whole values.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn fill_bar(level: Option<f64>) -> FillBar {
    let class = FillLevel::classify(level);
    let shown = level.filter(|l| !l.is_nan()).unwrap_or(0.0);

    FillBar {
        level: class,
        width_pct: shown.clamp(0.0, 100.0),
        color: class.color().to_string(),
        label: format!("{}%", format_number(shown)),
    }
}

fn marker(point: &CollectionPoint, opacity: f64) -> Marker {
    let (lat, lon) = point.coordinates();
    Marker {
        id: point.id.clone(),
        position: [lat, lon],
        opacity,
        popup: Popup {
            title: point.name.clone(),
            subtitle: format!("{} - {}", point.kind.as_str(), point.waste_type.as_str()),
            fill: fill_bar(point.fill_level),
            last_collection: format_fr_datetime(point.last_collection.as_deref()),
            capacity: format!("{} kg", format_number(point.capacity_kg)),
        },
    }
}

fn route_overlay(route: &SweepingRoute, opacity: f64) -> RouteOverlay {
    let style = PathStyle {
        color: ROUTE_COLOR.to_string(),
        weight: ROUTE_WEIGHT,
        opacity,
    };

    let polylines = adapt(route.geometry.as_ref())
        .polylines()
        .into_iter()
        .map(|positions| Polyline {
            positions,
            style: style.clone(),
        })
        .collect();

    RouteOverlay {
        route_id: route.id.clone(),
        name: route.name.clone(),
        polylines,
    }
}

/// Compose the map surface.
///
/// Never fails: a failed point load yields no markers, undrawable route
/// geometry yields no polylines, and the base layer is always present.
pub fn compose(inputs: MapInputs<'_>) -> MapComposition {
    let MapInputs {
        points,
        selected_route,
        layers,
        options,
    } = inputs;

    let points = points.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Collection points unavailable, rendering map without markers");
        Vec::new()
    });

    let markers = if layers.is_source_hidden(sources::COLLECTION_POINTS) {
        Vec::new()
    } else {
        let opacity = layers
            .layer_by_source(sources::COLLECTION_POINTS)
            .map_or(1.0, |l| l.opacity);
        points.iter().map(|p| marker(p, opacity)).collect()
    };

    let route = selected_route.and_then(|route| {
        if layers.is_source_hidden(sources::SWEEPING_ROUTES) {
            return None;
        }
        let opacity = layers
            .layer_by_source(sources::SWEEPING_ROUTES)
            .map_or(ROUTE_OPACITY, |l| l.opacity);
        Some(route_overlay(route, opacity))
    });

    MapComposition {
        base_layer: TileLayer {
            url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
        },
        center: options.center,
        zoom: options.zoom,
        layers: layers.layers(),
        markers,
        route,
        overlays: Overlays {
            legend: if options.show_legend {
                layers.legend()
            } else {
                None
            },
            scale: options
                .show_scale
                .then(|| ScaleBar::at(options.center[0], options.zoom)),
            north_arrow: options.show_north_arrow,
            logo: options.show_logo,
        },
    }
}
