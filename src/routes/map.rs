// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sweeping route list and map view routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CollectionPoint, Layer, Permission, Shift, SweepingRoute};
use crate::services::export::{ExportConfig, ExportPlan};
use crate::services::layers::Legend;
use crate::services::routes::{estimate_duration, format_length, RouteFilter};
use crate::services::{compose, MapComposition, MapInputs, MapOptions};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sweeping-routes", get(list_routes))
        .route("/api/sweeping-routes/{id}", get(get_route))
        .route("/api/sweeping-routes/{id}/select", post(select_route))
        .route("/api/map", get(get_map).delete(close_map))
        .route("/api/map/open", post(open_map))
        .route("/api/map/layers/{id}/toggle", post(toggle_layer))
        .route("/api/map/layers/{id}/opacity", put(set_layer_opacity))
        .route("/api/map/export", post(plan_export))
}

// ─── Sweeping routes ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct RouteQuery {
    /// "matin", "soir", or "all"/empty for every shift
    pub shift: Option<String>,
    pub q: Option<String>,
}

impl RouteQuery {
    fn to_filter(&self) -> Result<RouteFilter> {
        let shift = match self.shift.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse::<Shift>().map_err(AppError::BadRequest)?),
        };
        Ok(RouteFilter {
            shift,
            query: self.q.clone(),
        })
    }
}

/// One row of the sweeping route table.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteSummary {
    pub id: String,
    pub code: String,
    pub name: String,
    pub commune: String,
    pub shift: Shift,
    pub shift_label: String,
    pub length_meters: f64,
    pub length_label: String,
    pub duration_label: String,
    pub has_geometry: bool,
}

impl From<&SweepingRoute> for RouteSummary {
    fn from(route: &SweepingRoute) -> Self {
        Self {
            id: route.id.clone(),
            code: route.code.clone(),
            name: route.name.clone(),
            commune: route.commune.clone(),
            shift: route.shift,
            shift_label: route.shift.label().to_string(),
            length_meters: route.length_meters,
            length_label: format_length(route.length_meters),
            duration_label: estimate_duration(route.length_meters),
            has_geometry: route.geometry.is_some(),
        }
    }
}

async fn list_routes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<RouteSummary>>> {
    let filter = query.to_filter()?;
    let routes = state
        .routes
        .filter(&filter)
        .into_iter()
        .map(RouteSummary::from)
        .collect();
    Ok(Json(routes))
}

fn find_route<'a>(state: &'a AppState, id: &str) -> Result<&'a SweepingRoute> {
    state
        .routes
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Sweeping route {} not found", id)))
}

async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SweepingRoute>> {
    find_route(&state, &id).cloned().map(Json)
}

/// Mark a route to be drawn by the next map open.
async fn select_route(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let route = find_route(&state, &id)?;
    state.handoff.stash(&user.user_id, route)?;

    tracing::info!(user_id = %user.user_id, route_id = %id, "Route selected for map view");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Map view ────────────────────────────────────────────────

/// Overlay switches for a map open. Absent flags default to shown.
#[derive(Debug, Default, Deserialize)]
pub struct OpenQuery {
    pub legend: Option<bool>,
    pub scale: Option<bool>,
    pub north_arrow: Option<bool>,
    pub logo: Option<bool>,
}

fn map_not_open() -> AppError {
    AppError::NotFound("Map view is not open".to_string())
}

/// Compose the user's open view against the current point rows.
async fn compose_view(state: &AppState, user_id: &str) -> Result<MapComposition> {
    let points = state.db.list::<CollectionPoint>().await;

    state
        .map_sessions
        .with_view(user_id, |view| {
            compose(MapInputs {
                points,
                selected_route: view.selected_route.as_ref(),
                layers: &view.registry,
                options: &view.options,
            })
        })
        .ok_or_else(map_not_open)
}

/// Open a fresh map view, drawing the route handed off by the list page.
async fn open_map(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<OpenQuery>,
) -> Result<Json<MapComposition>> {
    let mut options = MapOptions::new(state.config.map_center, state.config.map_zoom);
    options.show_legend = query.legend.unwrap_or(true);
    options.show_scale = query.scale.unwrap_or(true);
    options.show_north_arrow = query.north_arrow.unwrap_or(true);
    options.show_logo = query.logo.unwrap_or(true);

    let selected_route = state.handoff.take(&user.user_id);
    state
        .map_sessions
        .open(&user.user_id, selected_route, options);

    compose_view(&state, &user.user_id).await.map(Json)
}

async fn get_map(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MapComposition>> {
    compose_view(&state, &user.user_id).await.map(Json)
}

async fn close_map(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> StatusCode {
    if state.map_sessions.close(&user.user_id) {
        tracing::debug!(user_id = %user.user_id, "Map view closed");
    }
    StatusCode::NO_CONTENT
}

/// Layer panel state after a change.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LayerPanel {
    pub layers: Vec<Layer>,
    pub legend: Option<Legend>,
}

/// Toggle one layer. Unknown layer ids leave the panel unchanged.
async fn toggle_layer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(layer_id): Path<String>,
) -> Result<Json<LayerPanel>> {
    state
        .map_sessions
        .with_view(&user.user_id, |view| {
            view.registry.toggle_visibility(&layer_id);
            LayerPanel {
                layers: view.registry.layers(),
                legend: view.registry.legend(),
            }
        })
        .map(Json)
        .ok_or_else(map_not_open)
}

#[derive(Debug, Deserialize)]
pub struct OpacityUpdate {
    pub opacity: f64,
}

/// Set one layer's opacity, clamped into [0, 1].
async fn set_layer_opacity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(layer_id): Path<String>,
    Json(update): Json<OpacityUpdate>,
) -> Result<Json<LayerPanel>> {
    state
        .map_sessions
        .with_view(&user.user_id, |view| {
            view.registry.set_opacity(&layer_id, update.opacity);
            LayerPanel {
                layers: view.registry.layers(),
                legend: view.registry.legend(),
            }
        })
        .map(Json)
        .ok_or_else(map_not_open)
}

/// Resolve an export request into the capture plan the client runs.
async fn plan_export(
    Extension(user): Extension<AuthUser>,
    Json(config): Json<ExportConfig>,
) -> Result<Json<ExportPlan>> {
    user.require(Permission::ExportMaps)?;

    let today = chrono::Local::now().date_naive();
    let plan = config
        .plan(today)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(
        user_id = %user.user_id,
        file_name = %plan.file_name,
        width = plan.width,
        height = plan.height,
        "Map export planned"
    );
    Ok(Json(plan))
}
