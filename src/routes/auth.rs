// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and logout.

use crate::config::Config;
use crate::error::Result;
use crate::middleware::auth::{create_jwt, Session, SESSION_COOKIE};
use crate::models::user::PermissionGrant;
use crate::models::User;
use crate::services::Credentials;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Session cookie with the attributes shared by creation and removal.
fn session_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.frontend_url.starts_with("https://"))
        .build()
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub permissions: Vec<PermissionGrant>,
}

/// Check credentials and open a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let user = state.authenticator.authenticate(&credentials)?;

    let ttl_hours = state.config.session_ttl_hours;
    let token = create_jwt(&user, &state.config.jwt_signing_key, ttl_hours)?;

    let mut cookie = session_cookie(&state.config, token.clone());
    cookie.set_max_age(time::Duration::hours(ttl_hours as i64));

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "Session opened");

    let permissions = user.role.permissions();
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user,
            token,
            permissions,
        }),
    ))
}

/// Close the session: clear the cookie and drop any open map view.
async fn logout(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(user) = session.user() {
        state.map_sessions.close(&user.user_id);
        let _ = state.handoff.take(&user.user_id);
        tracing::info!(user_id = %user.user_id, "Session closed");
    }

    let jar = jar.remove(session_cookie(&state.config, String::new()));
    (jar, StatusCode::NO_CONTENT)
}
