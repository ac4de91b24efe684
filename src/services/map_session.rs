// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user map view state.
//!
//! A view is created when the map is opened and dropped when it is
//! closed; its layer registry lives and dies with it.

use crate::models::SweepingRoute;
use crate::services::layers::LayerRegistry;
use crate::services::map_view::MapOptions;
use dashmap::DashMap;

/// State owned by one open map view.
#[derive(Debug)]
pub struct MapView {
    pub registry: LayerRegistry,
    pub selected_route: Option<SweepingRoute>,
    pub options: MapOptions,
}

#[derive(Debug, Default)]
pub struct MapSessions {
    views: DashMap<String, MapView>,
}

impl MapSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a fresh view for `user_id`, replacing any previous one.
    pub fn open(&self, user_id: &str, selected_route: Option<SweepingRoute>, options: MapOptions) {
        tracing::debug!(
            user_id,
            route = selected_route.as_ref().map(|r| r.id.as_str()),
            "Map view opened"
        );
        self.views.insert(
            user_id.to_string(),
            MapView {
                registry: LayerRegistry::default(),
                selected_route,
                options,
            },
        );
    }

    /// Unmount the view. Returns whether one was open.
    pub fn close(&self, user_id: &str) -> bool {
        self.views.remove(user_id).is_some()
    }

    pub fn is_open(&self, user_id: &str) -> bool {
        self.views.contains_key(user_id)
    }

    /// Run `f` against the user's open view.
    pub fn with_view<R>(&self, user_id: &str, f: impl FnOnce(&MapView) -> R) -> Option<R> {
        self.views.get(user_id).map(|view| f(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MapOptions {
        MapOptions::new((14.7167, -17.4677), 13)
    }

    #[test]
    fn test_reopen_resets_layers() {
        let sessions = MapSessions::new();
        sessions.open("u1", None, options());
        sessions.with_view("u1", |v| v.registry.toggle_visibility("1"));
        assert_eq!(
            sessions.with_view("u1", |v| v.registry.visible_layers().len()),
            Some(2)
        );

        sessions.open("u1", None, options());
        assert_eq!(
            sessions.with_view("u1", |v| v.registry.visible_layers().len()),
            Some(3)
        );
    }

    #[test]
    fn test_views_are_per_user() {
        let sessions = MapSessions::new();
        sessions.open("u1", None, options());
        assert!(sessions.is_open("u1"));
        assert!(!sessions.is_open("u2"));
        assert!(sessions.with_view("u2", |_| ()).is_none());

        assert!(sessions.close("u1"));
        assert!(!sessions.close("u1"));
    }
}
