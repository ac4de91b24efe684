// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geoportail: map and data portal for municipal waste management
//!
//! This crate provides the backend API behind the geoportail: collection
//! points, sweeping circuits and urban furniture on a layered map, a data
//! catalog, and role-based user administration.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{Authenticator, IdentityDirectory, MapSessions, RouteHandoff, SweepingRouteService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub routes: SweepingRouteService,
    /// Login and session checks go through this
    pub authenticator: Arc<dyn Authenticator>,
    /// Account rows backing the authenticator
    pub identities: Arc<IdentityDirectory>,
    pub map_sessions: MapSessions,
    pub handoff: RouteHandoff,
}

impl AppState {
    /// State whose authenticator is the identity directory itself.
    pub fn new(
        config: Config,
        db: Database,
        routes: SweepingRouteService,
        identities: IdentityDirectory,
    ) -> Self {
        let identities = Arc::new(identities);
        Self {
            config,
            db,
            routes,
            authenticator: identities.clone(),
            identities,
            map_sessions: MapSessions::new(),
            handoff: RouteHandoff::new(),
        }
    }
}
