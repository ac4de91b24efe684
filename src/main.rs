// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geoportail API Server
//!
//! Serves the map, catalog and administration API of the waste
//! management geoportail.

use geoportail::{
    config::Config,
    db::{seed, Database, FirestoreDb},
    models::StoredIdentity,
    services::{IdentityDirectory, SweepingRouteService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Geoportail API");

    // Select the record backend
    let db = match &config.gcp_project_id {
        Some(project_id) => Database::Firestore(FirestoreDb::new(project_id).await?),
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, using in-memory records");
            Database::memory()
        }
    };

    if config.seed_demo_data {
        seed::seed_demo_data(&db).await?;
    }

    // Load sweeping circuits
    let geo_path = config.sweeping_routes_path.clone();
    tracing::info!(path = %geo_path, "Loading sweeping routes");
    let routes = match SweepingRouteService::load_from_file(&geo_path) {
        Ok(routes) => routes,
        Err(e) => {
            // The rest of the portal works without circuits
            tracing::error!(path = %geo_path, error = %e, "Failed to load sweeping routes");
            SweepingRouteService::default()
        }
    };

    // Load accounts
    let identities = IdentityDirectory::load(db.list::<StoredIdentity>().await?);
    if identities.is_empty() {
        tracing::warn!("Identity directory is empty, nobody can log in");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db, routes, identities));

    // Build router
    let app = geoportail::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("geoportail=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
