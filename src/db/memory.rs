// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory record store.

use crate::db::Record;
use crate::error::AppError;
use dashmap::DashMap;
use std::sync::Arc;

/// Rows of one collection in insertion order, as `(id, json)`.
type Table = Vec<(String, serde_json::Value)>;

/// DashMap-backed store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<DashMap<&'static str, Table>>,
}

fn codec_error(e: serde_json::Error) -> AppError {
    AppError::Database(format!("Failed to convert record: {}", e))
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list<T: Record>(&self) -> Result<Vec<T>, AppError> {
        let Some(table) = self.tables.get(T::COLLECTION) else {
            return Ok(Vec::new());
        };
        let rows = table
            .iter()
            .map(|(_, row)| serde_json::from_value(row.clone()).map_err(codec_error))
            .collect();
        rows
    }

    pub fn get<T: Record>(&self, id: &str) -> Result<Option<T>, AppError> {
        let Some(table) = self.tables.get(T::COLLECTION) else {
            return Ok(None);
        };
        let row = table
            .iter()
            .find(|(row_id, _)| row_id == id)
            .map(|(_, row)| serde_json::from_value(row.clone()).map_err(codec_error))
            .transpose();
        row
    }

    pub fn upsert<T: Record>(&self, record: &T) -> Result<(), AppError> {
        let row = serde_json::to_value(record).map_err(codec_error)?;
        let mut table = self.tables.entry(T::COLLECTION).or_default();
        match table.iter_mut().find(|(row_id, _)| row_id == record.id()) {
            Some(existing) => existing.1 = row,
            None => table.push((record.id().to_string(), row)),
        }
        Ok(())
    }

    /// Returns whether a row was removed.
    pub fn delete<T: Record>(&self, id: &str) -> bool {
        let Some(mut table) = self.tables.get_mut(T::COLLECTION) else {
            return false;
        };
        let before = table.len();
        table.retain(|(row_id, _)| row_id != id);
        table.len() != before
    }
}
