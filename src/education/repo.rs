use serde_json::{json, Value};

use super::dto::{ExamPlan, MockTest, StudyProgress};
use crate::records::{insert_record, query_records, Decoded};
use crate::store::{DocumentStore, StoreError};

pub const EXAM_PLANS: &str = "examplan";
pub const STUDY_PROGRESS: &str = "studyprogress";
pub const MOCK_TESTS: &str = "mocktest";

const PLAN_LIMIT: i64 = 50;
const PROGRESS_LIMIT: i64 = 200;
const MOCK_LIMIT: i64 = 200;

/// Filter on the user and, when given and non-empty, the exam name as stored.
fn exam_filter(user_id: &str, exam: Option<&str>) -> Value {
    let mut filter = json!({ "user_id": user_id });
    if let Some(exam) = exam.filter(|e| !e.is_empty()) {
        filter["exam"] = Value::String(exam.to_string());
    }
    filter
}

pub async fn insert_plan(store: &dyn DocumentStore, plan: &ExamPlan) -> Result<(), StoreError> {
    insert_record(store, EXAM_PLANS, plan).await
}

pub async fn list_plans(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Decoded<ExamPlan>, StoreError> {
    query_records(store, EXAM_PLANS, json!({ "user_id": user_id }), PLAN_LIMIT).await
}

pub async fn insert_progress(
    store: &dyn DocumentStore,
    progress: &StudyProgress,
) -> Result<(), StoreError> {
    insert_record(store, STUDY_PROGRESS, progress).await
}

pub async fn list_progress(
    store: &dyn DocumentStore,
    user_id: &str,
    exam: Option<&str>,
) -> Result<Decoded<StudyProgress>, StoreError> {
    query_records(store, STUDY_PROGRESS, exam_filter(user_id, exam), PROGRESS_LIMIT).await
}

pub async fn insert_mock(store: &dyn DocumentStore, mock: &MockTest) -> Result<(), StoreError> {
    insert_record(store, MOCK_TESTS, mock).await
}

pub async fn list_mocks(
    store: &dyn DocumentStore,
    user_id: &str,
    exam: Option<&str>,
) -> Result<Decoded<MockTest>, StoreError> {
    query_records(store, MOCK_TESTS, exam_filter(user_id, exam), MOCK_LIMIT).await
}
