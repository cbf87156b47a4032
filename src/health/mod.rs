pub mod dto;
pub mod food;
pub mod handlers;
pub mod metrics;
mod repo;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::profile_routes())
        .merge(handlers::food_routes())
}
