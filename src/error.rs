use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Database unavailable")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "validation failed", "fields": fields })),
            )
                .into_response(),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{what} not found") })),
            )
                .into_response(),
            ApiError::Store(e) => {
                error!(error = %e, "document store call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Database unavailable" })),
                )
                    .into_response()
            }
        }
    }
}

/// Collects field violations so a request reports all of them at once.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn check(&mut self, ok: bool, field: &'static str, message: impl Into<String>) {
        if !ok {
            self.0.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn require_text(&mut self, value: &str, field: &'static str) {
        self.check(!value.trim().is_empty(), field, "must not be empty");
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.0))
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn violations_collect_every_failed_field() {
        let mut v = Violations::default();
        v.require_text("  ", "user_id");
        v.check(true, "age", "ignored");
        v.check(false, "height_cm", "must be greater than 0");
        match v.finish() {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].field, "user_id");
                assert_eq!(fields[1].field, "height_cm");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let res = ApiError::Validation(vec![]).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ApiError::NotFound("profile").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = ApiError::Store(StoreError::NotAnObject).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
