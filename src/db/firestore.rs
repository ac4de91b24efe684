// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed record operations.
//!
//! Every collection stores whole rows keyed by the record id; document ids
//! are the URL-encoded record ids.

use crate::db::Record;
use crate::error::AppError;
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

fn doc_id(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator needs no credentials
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    /// All rows of the record's collection.
    pub async fn list<T: Record>(&self) -> Result<Vec<T>, AppError> {
        self.client
            .fluent()
            .select()
            .from(T::COLLECTION)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(T::COLLECTION)
            .obj()
            .one(&doc_id(id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a row.
    pub async fn upsert<T: Record>(&self, record: &T) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(T::COLLECTION)
            .document_id(doc_id(record.id()))
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Store many rows.
    ///
    /// Uses concurrent writes with a limit to avoid overloading Firestore.
    pub async fn upsert_many<T: Record>(&self, records: &[T]) -> Result<(), AppError> {
        stream::iter(records)
            .map(|record| self.upsert(record))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(
            collection = T::COLLECTION,
            count = records.len(),
            "Batch upsert complete"
        );
        Ok(())
    }

    pub async fn delete<T: Record>(&self, id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(T::COLLECTION)
            .document_id(doc_id(id))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
