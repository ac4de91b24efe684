// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot route selection handoff from the route list to the map.

use crate::models::SweepingRoute;
use dashmap::DashMap;

/// Per-user slot holding a serialized route until the map consumes it.
#[derive(Debug, Default)]
pub struct RouteHandoff {
    slots: DashMap<String, String>,
}

impl RouteHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route` for `user_id`, replacing any earlier selection.
    pub fn stash(&self, user_id: &str, route: &SweepingRoute) -> anyhow::Result<()> {
        let payload = serde_json::to_string(route)?;
        self.slots.insert(user_id.to_string(), payload);
        Ok(())
    }

    /// Store raw content as-is.
    pub fn stash_raw(&self, user_id: &str, payload: String) {
        self.slots.insert(user_id.to_string(), payload);
    }

    /// Take and clear the selection. Content that no longer parses is
    /// discarded and treated as no selection.
    pub fn take(&self, user_id: &str) -> Option<SweepingRoute> {
        let (_, payload) = self.slots.remove(user_id)?;
        match serde_json::from_str(&payload) {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Discarding unreadable route selection");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shift;

    fn route() -> SweepingRoute {
        SweepingRoute {
            id: "1".to_string(),
            code: String::new(),
            name: "Circuit A".to_string(),
            region: "Dakar".to_string(),
            department: "Dakar".to_string(),
            commune: "Mermoz-Sacré-Coeur".to_string(),
            shift: Shift::Morning,
            length_meters: 1200.0,
            geometry: None,
        }
    }

    #[test]
    fn test_take_is_one_shot() {
        let handoff = RouteHandoff::new();
        handoff.stash("u1", &route()).unwrap();

        assert_eq!(handoff.take("u2"), None);
        assert_eq!(handoff.take("u1").map(|r| r.name), Some("Circuit A".to_string()));
        assert_eq!(handoff.take("u1"), None);
    }

    #[test]
    fn test_corrupt_payload_is_absent_and_cleared() {
        let handoff = RouteHandoff::new();
        handoff.stash_raw("u1", "{not json".to_string());
        assert_eq!(handoff.take("u1"), None);

        handoff.stash_raw("u1", r#"{"id": "1", "name": "Circuit A"}"#.to_string());
        assert_eq!(handoff.take("u1"), None);
    }
}
