// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Waste collection point model.

use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PointKind {
    Container,
    Bin,
    Center,
}

impl PointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointKind::Container => "container",
            PointKind::Bin => "bin",
            PointKind::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WasteKind {
    General,
    Recyclable,
    Organic,
    Hazardous,
}

impl WasteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteKind::General => "general",
            WasteKind::Recyclable => "recyclable",
            WasteKind::Organic => "organic",
            WasteKind::Hazardous => "hazardous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PointStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

/// A collection point row (`collection_points` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CollectionPoint {
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PointKind,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub capacity_kg: f64,
    /// Utilization percentage; absent when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub fill_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_collection: Option<String>,
    pub waste_type: WasteKind,
    #[serde(default)]
    pub status: PointStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commune_id: Option<String>,
}

impl CollectionPoint {
    /// Position as `(lat, lon)`, the order the map renders markers in.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
