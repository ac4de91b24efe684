// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use geoportail::config::Config;
use geoportail::db::{seed, Database};
use geoportail::middleware::auth::create_jwt;
use geoportail::models::StoredIdentity;
use geoportail::routes::create_router;
use geoportail::services::{IdentityDirectory, SweepingRouteService};
use geoportail::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Two circuits, one per shift.
#[allow(dead_code)]
pub const TEST_ROUTES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "Id": 1, "nomcircuit": "Circuit A", "commune": "Mermoz-Sacré-Coeur",
                "shift": "Matin", "longueur": 1.25 },
            "geometry": { "type": "LineString",
                "coordinates": [[-17.4771, 14.7071], [-17.4762, 14.7079], [-17.4750, 14.7086]] }
        },
        {
            "type": "Feature",
            "properties": { "Id": 2, "nomcircuit": "Circuit B", "commune": "Fann-Point E",
                "shift": "Soir", "longueur": 0.85 },
            "geometry": { "type": "MultiLineString",
                "coordinates": [[[-17.4645, 14.6921], [-17.4631, 14.6930]],
                                [[-17.4612, 14.6948], [-17.4601, 14.6957]]] }
        }
    ]
}"#;

fn test_routes() -> SweepingRouteService {
    SweepingRouteService::load_from_json(TEST_ROUTES).expect("test routes must parse")
}

fn build_app(config: Config, db: Database) -> (axum::Router, Arc<AppState>) {
    let identities = IdentityDirectory::load(IdentityDirectory::demo_identities());
    let state = Arc::new(AppState::new(config, db, test_routes(), identities));
    (create_router(state.clone()), state)
}

/// Create a test app over a seeded in-memory backend.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let db = Database::memory();
    seed::seed_demo_data(&db)
        .await
        .expect("Failed to seed in-memory database");
    build_app(Config::test_default(), db)
}

#[allow(dead_code)]
pub async fn create_test_app_with_frontend_url(frontend_url: &str) -> (axum::Router, Arc<AppState>) {
    let db = Database::memory();
    seed::seed_demo_data(&db)
        .await
        .expect("Failed to seed in-memory database");
    let mut config = Config::test_default();
    config.frontend_url = frontend_url.to_string();
    build_app(config, db)
}

/// Create a test app whose record backend is unreachable.
/// Logins still work since the identity directory lives in memory.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default(), Database::Offline)
}

/// Session token for one of the demo accounts ("1" admin, "2" geomaticien).
#[allow(dead_code)]
pub fn create_test_jwt(state: &AppState, user_id: &str) -> String {
    let user = state
        .identities
        .get(user_id)
        .map(|identity: StoredIdentity| identity.user())
        .expect("unknown test user");
    create_jwt(&user, &state.config.jwt_signing_key, 1).expect("Failed to create test JWT")
}

/// Build a request carrying the session as a Bearer token.
#[allow(dead_code)]
pub fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request through a clone of the router.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
