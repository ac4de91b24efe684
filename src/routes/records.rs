// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record routes: collection points, urban furniture and the data catalog.

use crate::db::Record;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    CollectionPoint, DatasetFormat, DatasetMetadata, Permission, UrbanFurniture,
};
use crate::services::catalog::{
    dataset_categories, dataset_formats, new_dataset, DatasetFilter, FurnitureFilter, PointFilter,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/collection-points",
            get(list_points).post(create_record::<CollectionPoint>),
        )
        .route(
            "/api/collection-points/{id}",
            get(get_record::<CollectionPoint>)
                .put(update_record::<CollectionPoint>)
                .delete(delete_record::<CollectionPoint>),
        )
        .route(
            "/api/furniture",
            get(list_furniture).post(create_record::<UrbanFurniture>),
        )
        .route(
            "/api/furniture/{id}",
            get(get_record::<UrbanFurniture>)
                .put(update_record::<UrbanFurniture>)
                .delete(delete_record::<UrbanFurniture>),
        )
        .route("/api/datasets", get(list_datasets).post(create_dataset))
}

fn not_found<T: Record>(id: &str) -> AppError {
    AppError::NotFound(format!("{} {} not found", T::COLLECTION, id))
}

// ─── Generic record handlers ─────────────────────────────────

async fn get_record<T: Record>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<T>> {
    state
        .db
        .get::<T>(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<T>(&id))
}

/// Create a row under a fresh id. Any client-sent id is ignored.
async fn create_record<T: Record + Validate>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(mut record): Json<T>,
) -> Result<(StatusCode, Json<T>)> {
    user.require(Permission::EditGeodata)?;
    record.validate()?;

    record.set_id(String::new());
    record.ensure_id();
    state.db.upsert(&record).await?;

    tracing::info!(
        collection = T::COLLECTION,
        id = record.id(),
        user_id = %user.user_id,
        "Record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Replace a row as a whole.
async fn update_record<T: Record + Validate>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut record): Json<T>,
) -> Result<Json<T>> {
    user.require(Permission::EditGeodata)?;
    record.validate()?;

    if state.db.get::<T>(&id).await?.is_none() {
        return Err(not_found::<T>(&id));
    }

    record.set_id(id);
    state.db.upsert(&record).await?;

    tracing::info!(
        collection = T::COLLECTION,
        id = record.id(),
        user_id = %user.user_id,
        "Record updated"
    );
    Ok(Json(record))
}

async fn delete_record<T: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    user.require(Permission::EditGeodata)?;

    if state.db.get::<T>(&id).await?.is_none() {
        return Err(not_found::<T>(&id));
    }
    state.db.delete::<T>(&id).await?;

    tracing::info!(
        collection = T::COLLECTION,
        id = %id,
        user_id = %user.user_id,
        "Record deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ─── Lists ───────────────────────────────────────────────────

async fn list_points(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PointFilter>,
) -> Result<Json<Vec<CollectionPoint>>> {
    let points = state.db.list::<CollectionPoint>().await?;
    Ok(Json(filter.apply(points)))
}

async fn list_furniture(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<FurnitureFilter>,
) -> Result<Json<Vec<UrbanFurniture>>> {
    let items = state.db.list::<UrbanFurniture>().await?;
    Ok(Json(filter.apply(&items).into_iter().cloned().collect()))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetMetadata>,
    /// Filter menu options, drawn from the whole catalog
    pub formats: Vec<DatasetFormat>,
    pub categories: Vec<String>,
}

async fn list_datasets(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DatasetFilter>,
) -> Result<Json<DatasetListResponse>> {
    let all = state.db.list::<DatasetMetadata>().await?;

    Ok(Json(DatasetListResponse {
        datasets: filter.apply(&all).into_iter().cloned().collect(),
        formats: dataset_formats(&all),
        categories: dataset_categories(&all),
    }))
}

#[derive(Deserialize, Validate)]
pub struct NewDatasetRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    pub format: DatasetFormat,
}

/// Register an uploaded dataset in the catalog.
async fn create_dataset(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<NewDatasetRequest>,
) -> Result<(StatusCode, Json<DatasetMetadata>)> {
    user.require(Permission::ImportData)?;
    request.validate()?;

    let owner = state
        .identities
        .get(&user.user_id)
        .map(|i| i.user.username)
        .unwrap_or_else(|| user.user_id.clone());

    let dataset = new_dataset(&request.name, &request.description, request.format, &owner);
    state.db.upsert(&dataset).await?;

    tracing::info!(dataset_id = %dataset.id, user_id = %user.user_id, "Dataset registered");
    Ok((StatusCode::CREATED, Json(dataset)))
}
