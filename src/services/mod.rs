// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod export;
pub mod fill_level;
pub mod geometry;
pub mod handoff;
pub mod identity;
pub mod layers;
pub mod map_session;
pub mod map_view;
pub mod routes;

pub use fill_level::FillLevel;
pub use handoff::RouteHandoff;
pub use identity::{Authenticator, AuthError, Credentials, IdentityDirectory};
pub use layers::LayerRegistry;
pub use map_session::MapSessions;
pub use map_view::{compose, MapComposition, MapInputs, MapOptions};
pub use routes::{RouteFilter, RouteLoadError, SweepingRouteService};
