// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users: profile and dashboard.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::PermissionGrant;
use crate::models::{CollectionPoint, DatasetMetadata, StoredIdentity, UrbanFurniture, User};
use crate::services::fill_level::FillLevel;
use crate::services::identity::check_photo_url;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// How many of the fullest points the dashboard lists.
const CRITICAL_POINTS_LIMIT: usize = 5;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/profile", put(update_profile))
        .route("/api/profile/photo", put(update_photo))
        .route("/api/dashboard", get(get_dashboard))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user: User,
    pub permissions: Vec<PermissionGrant>,
}

fn current_identity(state: &AppState, user: &AuthUser) -> Result<StoredIdentity> {
    state
        .identities
        .get(&user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))
}

/// Persist an updated account row, then publish it to the directory.
///
/// The directory is only touched once the write succeeded.
pub(crate) async fn save_identity(state: &AppState, mut identity: StoredIdentity) -> Result<User> {
    identity.user.last_updated = Some(format_utc_rfc3339(chrono::Utc::now()));
    state.db.upsert(&identity).await?;
    let user = identity.user();
    state.identities.insert(identity);
    Ok(user)
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let identity = current_identity(&state, &user)?;
    let permissions = identity.user.role.permissions();

    Ok(Json(MeResponse {
        user: identity.user(),
        permissions,
    }))
}

#[derive(Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Update name and email. Absent fields are left unchanged.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>> {
    update.validate()?;

    let mut identity = current_identity(&state, &user)?;
    if let Some(first_name) = update.first_name {
        identity.user.first_name = Some(first_name.trim().to_string());
    }
    if let Some(last_name) = update.last_name {
        identity.user.last_name = Some(last_name.trim().to_string());
    }
    if let Some(email) = update.email {
        identity.user.email = email.trim().to_string();
    }

    let updated = save_identity(&state, identity).await?;
    tracing::info!(user_id = %user.user_id, "Profile updated");
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct PhotoUpdate {
    pub photo_url: String,
}

/// Replace the profile photo with a URL or an inline image.
async fn update_photo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<PhotoUpdate>,
) -> Result<Json<User>> {
    check_photo_url(&update.photo_url).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut identity = current_identity(&state, &user)?;
    identity.user.photo_url = Some(update.photo_url);

    let updated = save_identity(&state, identity).await?;
    tracing::info!(user_id = %user.user_id, "Profile photo updated");
    Ok(Json(updated))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Debug, Default, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FillDistribution {
    pub unknown: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl FillDistribution {
    fn from_points(points: &[CollectionPoint]) -> Self {
        let mut dist = Self::default();
        for point in points {
            match FillLevel::classify(point.fill_level) {
                FillLevel::Unknown => dist.unknown += 1,
                FillLevel::Low => dist.low += 1,
                FillLevel::Medium => dist.medium += 1,
                FillLevel::High => dist.high += 1,
            }
        }
        dist
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CriticalPoint {
    pub id: String,
    pub name: String,
    pub fill_level: f64,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub collection_points: usize,
    pub furniture: usize,
    pub datasets: usize,
    pub sweeping_routes: usize,
    pub sweeping_length_km: f64,
    pub fill_levels: FillDistribution,
    /// Points in the high bucket, fullest first
    pub critical_points: Vec<CriticalPoint>,
}

/// High-bucket points, fullest first.
fn critical_points(points: &[CollectionPoint]) -> Vec<CriticalPoint> {
    let mut critical: Vec<CriticalPoint> = points
        .iter()
        .filter(|p| FillLevel::classify(p.fill_level) == FillLevel::High)
        .filter_map(|p| {
            p.fill_level.map(|fill_level| CriticalPoint {
                id: p.id.clone(),
                name: p.name.clone(),
                fill_level,
                color: FillLevel::High.color().to_string(),
            })
        })
        .collect();
    critical.sort_by(|a, b| b.fill_level.total_cmp(&a.fill_level));
    critical.truncate(CRITICAL_POINTS_LIMIT);
    critical
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>> {
    let points = state.db.list::<CollectionPoint>().await?;
    let furniture = state.db.list::<UrbanFurniture>().await?;
    let datasets = state.db.list::<DatasetMetadata>().await?;

    let routes = state.routes.routes();
    let sweeping_length_km = routes.iter().map(|r| r.length_meters).sum::<f64>() / 1000.0;

    Ok(Json(DashboardResponse {
        collection_points: points.len(),
        furniture: furniture.len(),
        datasets: datasets.len(),
        sweeping_routes: routes.len(),
        sweeping_length_km,
        fill_levels: FillDistribution::from_points(&points),
        critical_points: critical_points(&points),
    }))
}
