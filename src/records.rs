use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::store::{DocumentStore, StoreError};

pub const SKIPPED_RECORDS_HEADER: HeaderName = HeaderName::from_static("x-skipped-records");

#[derive(Debug, thiserror::Error)]
#[error("record {index} of `{collection}` does not match its shape: {source}")]
pub struct DecodeError {
    pub collection: String,
    pub index: usize,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

/// Records that decoded cleanly, plus how many stored documents did not.
#[derive(Debug)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

pub fn decode_one<T: DeserializeOwned>(
    collection: &str,
    index: usize,
    doc: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(doc).map_err(|source| DecodeError {
        collection: collection.to_string(),
        index,
        source,
    })
}

pub fn decode_all<T: DeserializeOwned>(collection: &str, docs: Vec<Value>) -> Decoded<T> {
    let mut out = Decoded::default();
    for (index, doc) in docs.into_iter().enumerate() {
        match decode_one(collection, index, doc) {
            Ok(record) => out.records.push(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed record");
                out.skipped += 1;
            }
        }
    }
    if out.skipped > 0 {
        warn!(%collection, skipped = out.skipped, kept = out.records.len(), "malformed records skipped");
    }
    out
}

pub async fn insert_record<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> Result<(), StoreError> {
    store.insert(collection, serde_json::to_value(record)?).await
}

pub async fn query_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    filter: Value,
    limit: i64,
) -> Result<Decoded<T>, StoreError> {
    let docs = store.query(collection, filter, limit).await?;
    Ok(decode_all(collection, docs))
}

impl<T: Serialize> IntoResponse for Decoded<T> {
    fn into_response(self) -> Response {
        let mut res = Json(self.records).into_response();
        res.headers_mut()
            .insert(SKIPPED_RECORDS_HEADER, HeaderValue::from(self.skipped));
        res
    }
}
