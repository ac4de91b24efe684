// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod collection_point;
pub mod dataset;
pub mod furniture;
pub mod layer;
pub mod route;
pub mod user;

pub use collection_point::{CollectionPoint, PointKind, PointStatus, WasteKind};
pub use dataset::{DatasetFormat, DatasetMetadata};
pub use furniture::{FurnitureKind, FurnitureStatus, UrbanFurniture};
pub use layer::{Layer, LayerKind, LayerStyle};
pub use route::{GeometryError, RouteGeometry, Shift, SweepingRoute};
pub use user::{Permission, Role, StoredIdentity, User};
