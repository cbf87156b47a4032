use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::state::AppState;

const PROBE_COLLECTION_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct StoreProbe {
    pub backend: &'static str,
    pub database: &'static str,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/test", get(probe_store))
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "TriTrack API running" }))
}

/// GET /test
#[instrument(skip(state))]
pub async fn probe_store(State(state): State<AppState>) -> Json<StoreProbe> {
    let store = state.store.backend();
    match state.store.collections(PROBE_COLLECTION_LIMIT).await {
        Ok(collections) => Json(StoreProbe {
            backend: "running",
            database: "connected",
            store,
            collections: Some(collections),
            error: None,
        }),
        Err(e) => {
            warn!(error = %e, "store probe failed");
            Json(StoreProbe {
                backend: "running",
                database: "not_connected",
                store,
                collections: None,
                error: Some(e.to_string()),
            })
        }
    }
}
