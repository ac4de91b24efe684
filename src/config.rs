// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

/// Default map center (Dakar).
pub const DEFAULT_MAP_CENTER: (f64, f64) = (14.7167, -17.4677);
pub const DEFAULT_MAP_ZOOM: u8 = 13;
/// Accepted session lifetimes, in hours (up to 30 days).
pub const SESSION_TTL_RANGE: std::ops::RangeInclusive<u64> = 1..=720;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID; when absent records live in memory
    pub gcp_project_id: Option<String>,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Session lifetime in hours
    pub session_ttl_hours: u64,
    /// GeoJSON file holding the sweeping circuits
    pub sweeping_routes_path: String,
    /// Seed demo identities and records on startup
    pub seed_demo_data: bool,
    /// Initial map center as (lat, lon)
    pub map_center: (f64, f64),
    /// Initial map zoom level
    pub map_zoom: u8,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: None,
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            session_ttl_hours: 12,
            sweeping_routes_path: "data/sweeping_routes.geojson".to_string(),
            seed_demo_data: true,
            map_center: DEFAULT_MAP_CENTER,
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gcp_project_id = env::var("GCP_PROJECT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());

        // Demo data only makes sense for the in-memory backend
        let seed_default = gcp_project_id.is_none();

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id,
            port: parse_or("PORT", 8080)?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            session_ttl_hours: session_ttl_hours()?,
            sweeping_routes_path: env::var("SWEEPING_ROUTES_PATH")
                .unwrap_or_else(|_| "data/sweeping_routes.geojson".to_string()),
            seed_demo_data: parse_or("SEED_DEMO_DATA", seed_default)?,
            map_center: (
                parse_or("MAP_CENTER_LAT", DEFAULT_MAP_CENTER.0)?,
                parse_or("MAP_CENTER_LON", DEFAULT_MAP_CENTER.1)?,
            ),
            map_zoom: parse_or("MAP_ZOOM", DEFAULT_MAP_ZOOM)?,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

fn session_ttl_hours() -> Result<u64, ConfigError> {
    let hours = parse_or("SESSION_TTL_HOURS", 12)?;
    if SESSION_TTL_RANGE.contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::Invalid("SESSION_TTL_HOURS", hours.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("MAP_ZOOM", "15");
        env::remove_var("GCP_PROJECT_ID");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");
        assert_eq!(config.map_zoom, 15);
        assert!(config.gcp_project_id.is_none());
        assert!(config.seed_demo_data);

        env::set_var("MAP_ZOOM", "street");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAP_ZOOM", _))
        ));
        env::remove_var("MAP_ZOOM");

        env::set_var("SESSION_TTL_HOURS", "48");
        assert_eq!(Config::from_env().unwrap().session_ttl_hours, 48);
        for raw in ["0", "721", "18446744073709551615"] {
            env::set_var("SESSION_TTL_HOURS", raw);
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::Invalid("SESSION_TTL_HOURS", _))
            ));
        }
        env::remove_var("SESSION_TTL_HOURS");
    }
}
