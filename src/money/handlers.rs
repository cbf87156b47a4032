use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{Hustle, MoneySummary, NewHustle, Transaction},
    ledger, repo, summary,
};
use crate::{
    error::ApiError,
    records::{Decoded, UserQuery},
    state::AppState,
};

pub fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/money/hustle", post(create_hustle).get(list_hustles))
        .route("/money/tx", post(record_transaction).get(list_transactions))
}

pub fn summary_routes() -> Router<AppState> {
    Router::new().route("/money/summary", get(money_summary))
}

/// POST /money/hustle
#[instrument(skip(state, new), fields(user_id = %new.user_id))]
pub async fn create_hustle(
    State(state): State<AppState>,
    Json(new): Json<NewHustle>,
) -> Result<Json<Hustle>, ApiError> {
    new.validate()?;
    let hustle = Hustle::create(new);
    repo::insert_hustle(state.store.as_ref(), &hustle).await?;
    info!(hustle_id = %hustle.id, name = %hustle.name, "hustle created");
    Ok(Json(hustle))
}

/// GET /money/hustle?user_id=
#[instrument(skip(state))]
pub async fn list_hustles(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Decoded<Hustle>, ApiError> {
    Ok(repo::list_hustles(state.store.as_ref(), &q.user_id).await?)
}

/// POST /money/tx
#[instrument(skip(state, tx), fields(user_id = %tx.user_id))]
pub async fn record_transaction(
    State(state): State<AppState>,
    Json(mut tx): Json<Transaction>,
) -> Result<Json<Transaction>, ApiError> {
    tx.validate()?;
    let store = state.store.as_ref();
    let found = match (tx.hustle_id, ledger::lookup_name(&tx)) {
        (Some(id), _) => repo::find_hustle(store, &tx.user_id, id).await?,
        (None, Some(name)) => repo::find_hustle_by_name(store, &tx.user_id, name).await?,
        (None, None) => None,
    };
    ledger::link_hustle(&mut tx, found.as_ref())?;
    ledger::categorize(&mut tx);

    repo::insert_transaction(state.store.as_ref(), &tx).await?;
    if tx.hustle_id.is_none() && tx.hustle_name.is_some() {
        warn!(hustle_name = ?tx.hustle_name, "transaction names an unregistered hustle");
    }
    Ok(Json(tx))
}

/// GET /money/tx?user_id=
#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Decoded<Transaction>, ApiError> {
    Ok(repo::list_transactions(state.store.as_ref(), &q.user_id).await?)
}

/// GET /money/summary?user_id=
#[instrument(skip(state))]
pub async fn money_summary(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Json<MoneySummary>, ApiError> {
    let store = state.store.as_ref();
    let txs = repo::list_transactions(store, &q.user_id).await?;
    let referenced: BTreeSet<Uuid> = txs.records.iter().filter_map(|t| t.hustle_id).collect();
    let hustles = repo::find_hustles(store, &q.user_id, &referenced).await?;
    let summary = summary::summarize(&txs.records, &hustles);
    info!(
        transactions = txs.records.len(),
        skipped = txs.skipped,
        hustles = summary.per_hustle.len(),
        "money summary computed"
    );
    Ok(Json(summary))
}
