// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record backend: Firestore in production, in-memory for demo and tests.

pub mod firestore;
pub mod memory;
pub mod seed;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{CollectionPoint, DatasetMetadata, StoredIdentity, UrbanFurniture};
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const COLLECTION_POINTS: &str = "collection_points";
    pub const URBAN_FURNITURE: &str = "urban_furniture";
    pub const DATASETS: &str = "datasets";
    pub const USERS: &str = "users";
}

/// A row stored whole, keyed by its id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Give the row a fresh UUID if it has none.
    fn ensure_id(&mut self) {
        if self.id().trim().is_empty() {
            self.set_id(uuid::Uuid::new_v4().to_string());
        }
    }
}

impl Record for CollectionPoint {
    const COLLECTION: &'static str = collections::COLLECTION_POINTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for UrbanFurniture {
    const COLLECTION: &'static str = collections::URBAN_FURNITURE;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for DatasetMetadata {
    const COLLECTION: &'static str = collections::DATASETS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for StoredIdentity {
    const COLLECTION: &'static str = collections::USERS;

    fn id(&self) -> &str {
        &self.user.id
    }

    fn set_id(&mut self, id: String) {
        self.user.id = id;
    }
}

/// Record store selected at startup.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
    /// Not connected; every call fails.
    Offline,
}

fn offline() -> AppError {
    AppError::Database("Database not connected (offline mode)".to_string())
}

impl Database {
    pub fn memory() -> Self {
        Database::Memory(MemoryDb::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Database::Firestore(_) => "firestore",
            Database::Memory(_) => "memory",
            Database::Offline => "offline",
        }
    }

    pub async fn list<T: Record>(&self) -> Result<Vec<T>, AppError> {
        match self {
            Database::Firestore(db) => db.list().await,
            Database::Memory(db) => db.list(),
            Database::Offline => Err(offline()),
        }
    }

    pub async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, AppError> {
        match self {
            Database::Firestore(db) => db.get(id).await,
            Database::Memory(db) => db.get(id),
            Database::Offline => Err(offline()),
        }
    }

    /// Write the whole row, replacing any row with the same id.
    pub async fn upsert<T: Record>(&self, record: &T) -> Result<(), AppError> {
        if record.id().is_empty() {
            return Err(AppError::BadRequest("Record has no id".to_string()));
        }
        match self {
            Database::Firestore(db) => db.upsert(record).await,
            Database::Memory(db) => db.upsert(record),
            Database::Offline => Err(offline()),
        }
    }

    pub async fn upsert_many<T: Record>(&self, records: &[T]) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.upsert_many(records).await,
            Database::Memory(db) => records.iter().try_for_each(|r| db.upsert(r)),
            Database::Offline => Err(offline()),
        }
    }

    pub async fn delete<T: Record>(&self, id: &str) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.delete::<T>(id).await,
            Database::Memory(db) => {
                db.delete::<T>(id);
                Ok(())
            }
            Database::Offline => Err(offline()),
        }
    }
}
