// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search and filter helpers for the catalog list pages.

use crate::models::{
    CollectionPoint, DatasetFormat, DatasetMetadata, FurnitureKind, FurnitureStatus, PointKind,
    PointStatus, UrbanFurniture, WasteKind,
};
use crate::time_utils::format_iso_date;
use serde::Deserialize;
use std::collections::BTreeSet;

pub const IMPORTED_CATEGORY: &str = "Importé";
pub const UPLOAD_SOURCE: &str = "Upload utilisateur";

/// Case-insensitive substring match; an empty needle matches everything.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn query(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|q| !q.is_empty())
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatasetFilter {
    #[serde(default, rename = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub format: Option<DatasetFormat>,
    #[serde(default)]
    pub category: Option<String>,
}

impl DatasetFilter {
    pub fn matches(&self, dataset: &DatasetMetadata) -> bool {
        let matches_query = query(&self.query).is_none_or(|q| {
            contains(&dataset.name, q)
                || contains(&dataset.description, q)
                || dataset.tags.iter().any(|t| contains(t, q))
        });

        matches_query
            && self.format.is_none_or(|f| f == dataset.format)
            && self
                .category
                .as_deref()
                .is_none_or(|c| c == dataset.category)
    }

    pub fn apply<'a>(&self, datasets: &'a [DatasetMetadata]) -> Vec<&'a DatasetMetadata> {
        datasets.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Distinct formats present, for the filter menu.
pub fn dataset_formats(datasets: &[DatasetMetadata]) -> Vec<DatasetFormat> {
    datasets
        .iter()
        .map(|d| d.format)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories present, sorted.
pub fn dataset_categories(datasets: &[DatasetMetadata]) -> Vec<String> {
    datasets
        .iter()
        .map(|d| d.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Catalog entry for an uploaded file. Only the metadata is recorded.
pub fn new_dataset(
    name: &str,
    description: &str,
    format: DatasetFormat,
    owner: &str,
) -> DatasetMetadata {
    DatasetMetadata {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        category: IMPORTED_CATEGORY.to_string(),
        source: UPLOAD_SOURCE.to_string(),
        last_updated: format_iso_date(chrono::Utc::now().date_naive()),
        format,
        owner: owner.to_string(),
        tags: Vec::new(),
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FurnitureFilter {
    #[serde(default, rename = "q")]
    pub query: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<FurnitureKind>,
    #[serde(default)]
    pub status: Option<FurnitureStatus>,
}

impl FurnitureFilter {
    pub fn matches(&self, item: &UrbanFurniture) -> bool {
        let matches_query = query(&self.query).is_none_or(|q| {
            contains(item.kind.label(), q)
                || contains(&item.location, q)
                || contains(&item.description, q)
        });

        matches_query
            && self.kind.is_none_or(|k| k == item.kind)
            && self.status.is_none_or(|s| s == item.status)
    }

    pub fn apply<'a>(&self, items: &'a [UrbanFurniture]) -> Vec<&'a UrbanFurniture> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PointFilter {
    #[serde(default, rename = "q")]
    pub query: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<PointKind>,
    #[serde(default)]
    pub waste_type: Option<WasteKind>,
    #[serde(default)]
    pub status: Option<PointStatus>,
}

impl PointFilter {
    pub fn matches(&self, point: &CollectionPoint) -> bool {
        query(&self.query).is_none_or(|q| contains(&point.name, q))
            && self.kind.is_none_or(|k| k == point.kind)
            && self.waste_type.is_none_or(|w| w == point.waste_type)
            && self.status.is_none_or(|s| s == point.status)
    }

    pub fn apply(&self, points: Vec<CollectionPoint>) -> Vec<CollectionPoint> {
        points.into_iter().filter(|p| self.matches(p)).collect()
    }
}
