use std::collections::BTreeSet;

use serde_json::json;
use uuid::Uuid;

use super::dto::{Hustle, Transaction};
use crate::records::{insert_record, query_records, Decoded};
use crate::store::{DocumentStore, StoreError};

pub const HUSTLES: &str = "hustle";
pub const TRANSACTIONS: &str = "transaction";

const HUSTLE_LIMIT: i64 = 100;
const TRANSACTION_LIMIT: i64 = 1000;

pub async fn insert_hustle(store: &dyn DocumentStore, hustle: &Hustle) -> Result<(), StoreError> {
    insert_record(store, HUSTLES, hustle).await
}

pub async fn list_hustles(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Decoded<Hustle>, StoreError> {
    query_records(store, HUSTLES, json!({ "user_id": user_id }), HUSTLE_LIMIT).await
}

/// The user's hustle with this id, however old.
pub async fn find_hustle(
    store: &dyn DocumentStore,
    user_id: &str,
    id: Uuid,
) -> Result<Option<Hustle>, StoreError> {
    let found = query_records(store, HUSTLES, json!({ "user_id": user_id, "id": id }), 1).await?;
    Ok(found.records.into_iter().next())
}

/// The user's newest hustle named exactly `name`.
pub async fn find_hustle_by_name(
    store: &dyn DocumentStore,
    user_id: &str,
    name: &str,
) -> Result<Option<Hustle>, StoreError> {
    let found =
        query_records(store, HUSTLES, json!({ "user_id": user_id, "name": name }), 1).await?;
    Ok(found.records.into_iter().next())
}

/// The user's hustles among `ids`; ids with no hustle are left out.
pub async fn find_hustles(
    store: &dyn DocumentStore,
    user_id: &str,
    ids: &BTreeSet<Uuid>,
) -> Result<Vec<Hustle>, StoreError> {
    let mut hustles = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(hustle) = find_hustle(store, user_id, *id).await? {
            hustles.push(hustle);
        }
    }
    Ok(hustles)
}

pub async fn insert_transaction(store: &dyn DocumentStore, tx: &Transaction) -> Result<(), StoreError> {
    insert_record(store, TRANSACTIONS, tx).await
}

/// Most recent transactions of the user.
pub async fn list_transactions(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Decoded<Transaction>, StoreError> {
    query_records(store, TRANSACTIONS, json!({ "user_id": user_id }), TRANSACTION_LIMIT).await
}
