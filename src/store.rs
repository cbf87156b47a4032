use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("documents must be JSON objects")]
    NotAnObject,
    #[error("serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Collection-oriented document store.
///
/// Documents come back with the store-assigned `_id` and `created_at` merged
/// into the body (and `updated_at` for upserted documents), newest first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn insert(&self, collection: &str, doc: Value) -> Result<(), StoreError>;
    /// Insert or replace the single document of `collection` stored under `key`.
    async fn upsert(&self, collection: &str, key: &str, doc: Value) -> Result<(), StoreError>;
    /// Documents whose top-level fields equal every field of `filter`.
    async fn query(
        &self,
        collection: &str,
        filter: Value,
        limit: i64,
    ) -> Result<Vec<Value>, StoreError>;
    async fn collections(&self, limit: i64) -> Result<Vec<String>, StoreError>;
}

#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: &str, doc: Value) -> Result<(), StoreError> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(doc)
        .execute(&self.db)
        .await?;
        debug!(%collection, %id, "document inserted");
        Ok(())
    }

    async fn upsert(&self, collection: &str, key: &str, doc: Value) -> Result<(), StoreError> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, upsert_key, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, upsert_key)
            DO UPDATE SET body = EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(key)
        .bind(doc)
        .execute(&self.db)
        .await?;
        debug!(%collection, %key, "document upserted");
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Value,
        limit: i64,
    ) -> Result<Vec<Value>, StoreError> {
        let rows = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT body || jsonb_build_object(
                       '_id', id,
                       'created_at', created_at,
                       'updated_at', updated_at)
              FROM documents
             WHERE collection = $1 AND body @> $2
             ORDER BY created_at DESC
             LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(filter)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn collections(&self, limit: i64) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT collection
              FROM documents
             ORDER BY collection
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(names)
    }
}

struct MemoryDocument {
    key: Option<String>,
    body: Value,
}

/// Process-local store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<MemoryDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now_rfc3339() -> Result<Value, StoreError> {
    Ok(Value::String(OffsetDateTime::now_utc().format(&Rfc3339)?))
}

fn into_object(doc: Value) -> Result<Map<String, Value>, StoreError> {
    match doc {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

fn matches(doc: &Value, filter: &Value) -> bool {
    match filter.as_object() {
        Some(fields) => fields.iter().all(|(k, v)| doc.get(k) == Some(v)),
        None => true,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, doc: Value) -> Result<(), StoreError> {
        let mut body = into_object(doc)?;
        let now = now_rfc3339()?;
        body.insert("_id".into(), Value::String(Uuid::new_v4().to_string()));
        body.insert("created_at".into(), now.clone());
        body.insert("updated_at".into(), now);

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(MemoryDocument {
                key: None,
                body: Value::Object(body),
            });
        debug!(%collection, "document inserted");
        Ok(())
    }

    async fn upsert(&self, collection: &str, key: &str, doc: Value) -> Result<(), StoreError> {
        let mut body = into_object(doc)?;
        let now = now_rfc3339()?;

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter().position(|d| d.key.as_deref() == Some(key)) {
            Some(pos) => {
                // Replace the body but keep identity and creation time.
                let existing = docs.remove(pos);
                for field in ["_id", "created_at"] {
                    if let Some(v) = existing.body.get(field) {
                        body.insert(field.into(), v.clone());
                    }
                }
                body.insert("updated_at".into(), now);
                docs.push(MemoryDocument {
                    key: Some(key.to_string()),
                    body: Value::Object(body),
                });
            }
            None => {
                body.insert("_id".into(), Value::String(Uuid::new_v4().to_string()));
                body.insert("created_at".into(), now.clone());
                body.insert("updated_at".into(), now);
                docs.push(MemoryDocument {
                    key: Some(key.to_string()),
                    body: Value::Object(body),
                });
            }
        }
        debug!(%collection, %key, "document upserted");
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Value,
        limit: i64,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(docs
            .iter()
            .rev()
            .filter(|d| matches(&d.body, &filter))
            .take(limit)
            .map(|d| d.body.clone())
            .collect())
    }

    async fn collections(&self, limit: i64) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        names.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(names)
    }
}
