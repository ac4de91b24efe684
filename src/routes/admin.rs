// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account administration routes (admin role only).

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Role, StoredIdentity, User};
use crate::routes::api::save_identity;
use crate::services::identity::{hash_password, new_identity};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Admin routes. `require_admin` is layered on in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(list_users).post(create_user))
        .route("/api/admin/users/{id}", put(update_user).delete(delete_user))
}

fn parse_role(raw: &str) -> Result<Role> {
    Role::parse(raw).ok_or_else(|| AppError::BadRequest(format!("Unknown role '{raw}'")))
}

fn find_identity(state: &AppState, id: &str) -> Result<StoredIdentity> {
    state
        .identities
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.identities.users())
}

#[derive(Deserialize, Validate)]
pub struct NewUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    pub role: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Json(request): Json<NewUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    request.validate()?;
    let role = parse_role(&request.role)?;

    let username = request.username.trim();
    if state.identities.username_taken(username, None) {
        return Err(AppError::BadRequest(format!(
            "Username '{username}' is already taken"
        )));
    }

    let identity = new_identity(
        username,
        &request.email,
        &request.password,
        role,
        request.first_name,
        request.last_name,
    );
    let user = save_identity(&state, identity).await?;

    tracing::info!(admin_id = %admin.user_id, user_id = %user.id, role = role.as_str(), "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    /// New password; absent keeps the current one
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(request): Json<UserUpdateRequest>,
) -> Result<Json<User>> {
    request.validate()?;
    let mut identity = find_identity(&state, &id)?;

    if let Some(role) = request.role.as_deref() {
        identity.user.role = parse_role(role)?;
    }
    if let Some(email) = request.email {
        identity.user.email = email.trim().to_string();
    }
    if let Some(first_name) = request.first_name {
        identity.user.first_name = Some(first_name.trim().to_string());
    }
    if let Some(last_name) = request.last_name {
        identity.user.last_name = Some(last_name.trim().to_string());
    }
    if let Some(password) = request.password {
        identity.password_hash = hash_password(&identity.user.id, &password);
    }

    let user = save_identity(&state, identity).await?;
    tracing::info!(admin_id = %admin.user_id, user_id = %id, "User updated");
    Ok(Json(user))
}

/// Delete an account and everything held for it in memory.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Administrators cannot delete their own account".to_string(),
        ));
    }
    find_identity(&state, &id)?;

    state.db.delete::<StoredIdentity>(&id).await?;
    state.identities.remove(&id);
    state.map_sessions.close(&id);
    state.handoff.take(&id);

    tracing::info!(admin_id = %admin.user_id, user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
