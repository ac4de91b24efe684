// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data catalog entries.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DatasetFormat {
    #[serde(rename = "SHP")]
    Shp,
    #[serde(rename = "GeoJSON")]
    GeoJson,
    #[serde(rename = "CSV")]
    Csv,
    #[serde(rename = "KML")]
    Kml,
    #[serde(rename = "PDF")]
    Pdf,
}

/// Metadata describing one dataset in the catalog (`datasets` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DatasetMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub source: String,
    /// Date of last update (YYYY-MM-DD)
    pub last_updated: String,
    pub format: DatasetFormat,
    pub owner: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
