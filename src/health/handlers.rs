use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{FoodEntry, FoodParseRequest, Profile, ProfileDetails, ProfileMetrics},
    food, metrics, repo,
};
use crate::{
    error::ApiError,
    records::{Decoded, UserQuery},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/health/profile", post(upsert_profile).get(get_profile))
}

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/health/food/parse", post(parse_food))
        .route("/health/food/logs", get(list_food_logs))
}

/// POST /health/profile
#[instrument(skip(state, profile), fields(user_id = %profile.user_id))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<ProfileMetrics>, ApiError> {
    profile.validate()?;
    repo::upsert_profile(state.store.as_ref(), &profile).await?;

    let metrics = metrics::profile_metrics(&profile);
    info!(bmi = metrics.bmi, tdee = metrics.tdee, "profile saved");
    Ok(Json(metrics))
}

/// GET /health/profile?user_id=
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Json<ProfileDetails>, ApiError> {
    let stored = repo::find_profile(state.store.as_ref(), &q.user_id)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;
    let metrics = metrics::profile_metrics(&stored.profile);
    Ok(Json(ProfileDetails {
        profile: stored,
        metrics,
    }))
}

/// POST /health/food/parse
#[instrument(skip(state, request), fields(user_id = %request.user_id))]
pub async fn parse_food(
    State(state): State<AppState>,
    Json(request): Json<FoodParseRequest>,
) -> Result<Json<FoodEntry>, ApiError> {
    request.validate()?;
    let entry = food::build_entry(&request, OffsetDateTime::now_utc());
    repo::insert_food_entry(state.store.as_ref(), &entry).await?;
    info!(description = %entry.description, "food logged");
    Ok(Json(entry))
}

/// GET /health/food/logs?user_id=
#[instrument(skip(state))]
pub async fn list_food_logs(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Decoded<FoodEntry>, ApiError> {
    Ok(repo::list_food_entries(state.store.as_ref(), &q.user_id).await?)
}
