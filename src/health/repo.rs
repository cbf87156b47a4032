use serde_json::json;

use super::dto::{FoodEntry, Profile, StoredProfile};
use crate::records::{insert_record, query_records, Decoded};
use crate::store::{DocumentStore, StoreError};

pub const PROFILES: &str = "profile";
pub const FOOD_ENTRIES: &str = "foodentry";

pub const FOOD_LOG_LIMIT: i64 = 100;

/// Insert or overwrite the user's profile.
pub async fn upsert_profile(store: &dyn DocumentStore, profile: &Profile) -> Result<(), StoreError> {
    store
        .upsert(PROFILES, &profile.user_id, serde_json::to_value(profile)?)
        .await
}

pub async fn find_profile(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Option<StoredProfile>, StoreError> {
    let found: Decoded<StoredProfile> =
        query_records(store, PROFILES, json!({ "user_id": user_id }), 1).await?;
    Ok(found.records.into_iter().next())
}

pub async fn insert_food_entry(store: &dyn DocumentStore, entry: &FoodEntry) -> Result<(), StoreError> {
    insert_record(store, FOOD_ENTRIES, entry).await
}

pub async fn list_food_entries(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Decoded<FoodEntry>, StoreError> {
    query_records(store, FOOD_ENTRIES, json!({ "user_id": user_id }), FOOD_LOG_LIMIT).await
}
