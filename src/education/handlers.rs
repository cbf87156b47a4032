use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{ExamPlan, ExamQuery, MockTest, PlanRequest, StudyProgress},
    planner, repo,
};
use crate::{
    error::ApiError,
    records::{Decoded, UserQuery},
    state::AppState,
};

pub fn plan_routes() -> Router<AppState> {
    Router::new().route("/education/plan", post(generate_plan).get(list_plans))
}

pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/education/progress", post(record_progress).get(list_progress))
        .route("/education/mock", post(record_mock_test).get(list_mock_tests))
}

/// POST /education/plan
#[instrument(skip(state, request), fields(user_id = %request.user_id, exam = %request.exam))]
pub async fn generate_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<ExamPlan>, ApiError> {
    request.validate()?;
    let plan = planner::generate_plan(&request, OffsetDateTime::now_utc());
    repo::insert_plan(state.store.as_ref(), &plan).await?;
    info!(topics = plan.items.len(), "study plan generated");
    Ok(Json(plan))
}

/// GET /education/plan?user_id=
#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Decoded<ExamPlan>, ApiError> {
    Ok(repo::list_plans(state.store.as_ref(), &q.user_id).await?)
}

/// POST /education/progress
#[instrument(skip(state, progress), fields(user_id = %progress.user_id))]
pub async fn record_progress(
    State(state): State<AppState>,
    Json(progress): Json<StudyProgress>,
) -> Result<Json<StudyProgress>, ApiError> {
    progress.validate()?;
    repo::insert_progress(state.store.as_ref(), &progress).await?;
    Ok(Json(progress))
}

/// GET /education/progress?user_id=&exam=
#[instrument(skip(state))]
pub async fn list_progress(
    State(state): State<AppState>,
    Query(q): Query<ExamQuery>,
) -> Result<Decoded<StudyProgress>, ApiError> {
    Ok(repo::list_progress(state.store.as_ref(), &q.user_id, q.exam.as_deref()).await?)
}

/// POST /education/mock
#[instrument(skip(state, mock), fields(user_id = %mock.user_id))]
pub async fn record_mock_test(
    State(state): State<AppState>,
    Json(mock): Json<MockTest>,
) -> Result<Json<MockTest>, ApiError> {
    mock.validate()?;
    repo::insert_mock(state.store.as_ref(), &mock).await?;
    Ok(Json(mock))
}

/// GET /education/mock?user_id=&exam=
#[instrument(skip(state))]
pub async fn list_mock_tests(
    State(state): State<AppState>,
    Query(q): Query<ExamQuery>,
) -> Result<Decoded<MockTest>, ApiError> {
    Ok(repo::list_mocks(state.store.as_ref(), &q.user_id, q.exam.as_deref()).await?)
}

#[cfg(test)]
mod handler_tests {
    use super::*;
    use crate::education::dto::StudyStatus;

    fn progress(user_id: &str, exam: &str, topic: &str) -> StudyProgress {
        StudyProgress {
            user_id: user_id.into(),
            exam: exam.into(),
            topic: topic.into(),
            status: StudyStatus::Done,
            score: Some(72.5),
        }
    }

    #[tokio::test]
    async fn plans_are_kept_side_by_side() {
        let state = AppState::fake();
        for exam in ["gre", "neet"] {
            generate_plan(
                State(state.clone()),
                Json(PlanRequest {
                    user_id: "u1".into(),
                    exam: exam.into(),
                    hours_per_day: 2.0,
                    weeks: 8,
                }),
            )
            .await
            .unwrap();
        }

        let plans = list_plans(
            State(state),
            Query(UserQuery {
                user_id: "u1".into(),
            }),
        )
        .await
        .unwrap();
        let exams: Vec<_> = plans.records.iter().map(|p| p.exam.as_str()).collect();
        assert_eq!(exams, vec!["NEET", "GRE"]);
        assert!(plans.records[0].items.iter().all(|i| i.due_date.is_some()));
    }

    #[tokio::test]
    async fn progress_is_echoed_and_filtered_by_exam() {
        let state = AppState::fake();
        let Json(echo) = record_progress(State(state.clone()), Json(progress("u1", "GRE", "Quant")))
            .await
            .unwrap();
        assert_eq!(echo, progress("u1", "GRE", "Quant"));
        record_progress(State(state.clone()), Json(progress("u1", "NEET", "Biology")))
            .await
            .unwrap();
        record_progress(State(state.clone()), Json(progress("u2", "GRE", "Verbal")))
            .await
            .unwrap();

        let all = list_progress(
            State(state.clone()),
            Query(ExamQuery {
                user_id: "u1".into(),
                exam: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(all.records.len(), 2);

        let gre = list_progress(
            State(state),
            Query(ExamQuery {
                user_id: "u1".into(),
                exam: Some("GRE".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(gre.records, vec![progress("u1", "GRE", "Quant")]);
    }

    #[tokio::test]
    async fn mock_tests_round_through_store() {
        let state = AppState::fake();
        let mock = MockTest {
            user_id: "u1".into(),
            exam: "SSC".into(),
            title: "Full length #1".into(),
            score: Some(140.0),
            taken_at: None,
        };
        let Json(echo) = record_mock_test(State(state.clone()), Json(mock.clone()))
            .await
            .unwrap();
        assert_eq!(echo, mock);

        let listed = list_mock_tests(
            State(state),
            Query(ExamQuery {
                user_id: "u1".into(),
                exam: Some("SSC".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(listed.records, vec![mock]);
    }

    #[tokio::test]
    async fn blank_topic_is_rejected() {
        let state = AppState::fake();
        let err = record_progress(State(state), Json(progress("u1", "GRE", "")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
