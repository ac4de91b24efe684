// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Urban furniture (street bins, regrouping points) model.

use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FurnitureKind {
    /// Point de Regroupement Normalisé
    Prn,
    BacRue,
    PointPropre,
}

impl FurnitureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FurnitureKind::Prn => "Point de Regroupement Normalisé",
            FurnitureKind::BacRue => "Bac de rue",
            FurnitureKind::PointPropre => "Point propre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FurnitureStatus {
    #[default]
    Good,
    NeedsMaintenance,
    Damaged,
}

impl FurnitureStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FurnitureStatus::Good => "Bon état",
            FurnitureStatus::NeedsMaintenance => "Maintenance requise",
            FurnitureStatus::Damaged => "Endommagé",
        }
    }
}

/// An urban furniture row (`urban_furniture` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UrbanFurniture {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub install_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<String>,
    #[validate(range(min = 0.0))]
    pub capacity_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub fill_level: Option<f64>,
    #[serde(default)]
    pub status: FurnitureStatus,
}
