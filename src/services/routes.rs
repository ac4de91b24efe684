// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sweeping route loading and list filtering.

use crate::models::route::{RouteGeometry, Shift, SweepingRoute};
use geojson::{Feature, GeoJson};
use std::fs;
use std::path::Path;

const DEFAULT_REGION: &str = "Dakar";
/// Sweeping pace used for duration estimates.
const MINUTES_PER_KM: f64 = 15.0;

/// Service holding the sweeping circuits loaded at startup.
#[derive(Debug, Default, Clone)]
pub struct SweepingRouteService {
    routes: Vec<SweepingRoute>,
}

impl SweepingRouteService {
    pub fn new(routes: Vec<SweepingRoute>) -> Self {
        Self { routes }
    }

    /// Load routes from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RouteLoadError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| RouteLoadError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load routes from a GeoJSON FeatureCollection string.
    pub fn load_from_json(json_data: &str) -> Result<Self, RouteLoadError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| RouteLoadError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(RouteLoadError::NotACollection);
        };

        let routes: Vec<SweepingRoute> = collection
            .features
            .into_iter()
            .filter_map(Self::route_from_feature)
            .collect();

        tracing::info!(count = routes.len(), "Loaded sweeping routes");
        Ok(Self { routes })
    }

    /// Build a route from one feature. Features without a circuit name
    /// are not routes and are skipped.
    fn route_from_feature(feature: Feature) -> Option<SweepingRoute> {
        let name = text(&feature, "nomcircuit").filter(|n| !n.is_empty())?;

        let id = match feature.property("Id") {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            _ => uuid::Uuid::new_v4().to_string(),
        };

        let shift = match text(&feature, "shift") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(route = %name, error = %e, "Unknown shift, assuming morning");
                Shift::Morning
            }),
            None => Shift::Morning,
        };

        let length_km = feature
            .property("longueur")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        let code = text(&feature, "code").unwrap_or_default();
        let region = text(&feature, "region").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let department = text(&feature, "dept").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let commune = text(&feature, "commune").unwrap_or_default();

        let geometry = feature.geometry.and_then(|g| {
            RouteGeometry::try_from(g)
                .map_err(|e| {
                    tracing::warn!(route = %name, error = %e, "Route geometry not usable");
                })
                .ok()
        });

        Some(SweepingRoute {
            id,
            code,
            region,
            department,
            commune,
            name,
            shift,
            length_meters: length_km * 1000.0,
            geometry,
        })
    }

    /// All routes, in file order.
    pub fn routes(&self) -> &[SweepingRoute] {
        &self.routes
    }

    pub fn get(&self, id: &str) -> Option<&SweepingRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Routes matching the filter, in file order.
    pub fn filter(&self, filter: &RouteFilter) -> Vec<&SweepingRoute> {
        self.routes.iter().filter(|r| filter.matches(r)).collect()
    }
}

fn text(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// List filter for the sweeping route page.
#[derive(Debug, Default, Clone)]
pub struct RouteFilter {
    pub shift: Option<Shift>,
    pub query: Option<String>,
}

impl RouteFilter {
    pub fn matches(&self, route: &SweepingRoute) -> bool {
        if self.shift.is_some_and(|s| s != route.shift) {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                route.name.to_lowercase().contains(&q) || route.commune.to_lowercase().contains(&q)
            }
        }
    }
}

/// "1.25 km" from 1000 m up, "850 m" below.
pub fn format_length(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round())
    }
}

/// Sweeping time at a fixed pace: "45 min", "1h 15min", "2h".
pub fn estimate_duration(meters: f64) -> String {
    let minutes = (meters / 1000.0 * MINUTES_PER_KM).round().max(0.0) as u64;
    if minutes >= 60 {
        let (hours, rest) = (minutes / 60, minutes % 60);
        if rest > 0 {
            format!("{hours}h {rest}min")
        } else {
            format!("{hours}h")
        }
    } else {
        format!("{minutes} min")
    }
}

/// Errors from route loading.
#[derive(Debug, thiserror::Error)]
pub enum RouteLoadError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("GeoJSON is not a FeatureCollection")]
    NotACollection,
}
