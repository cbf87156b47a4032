pub mod dto;
pub mod handlers;
pub mod ledger;
mod repo;
pub mod summary;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::ledger_routes())
        .merge(handlers::summary_routes())
}
