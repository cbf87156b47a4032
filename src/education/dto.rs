use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{ApiError, Violations};

/// Longest window due dates are spread over, in weeks.
pub const MAX_PLAN_WEEKS: i64 = 520;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    Pending,
    InProgress,
    Done,
}

fn pending() -> StudyStatus {
    StudyStatus::Pending
}

fn in_progress() -> StudyStatus {
    StudyStatus::InProgress
}

fn default_hours_per_day() -> f64 {
    2.0
}

fn default_weeks() -> i64 {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamPlanItem {
    pub topic: String,
    pub hours: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    /// Days after which the topic is reviewed again.
    #[serde(default)]
    pub repetitions: Vec<u32>,
    #[serde(default = "pending")]
    pub status: StudyStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamPlan {
    pub user_id: String,
    pub exam: String,
    #[serde(default = "default_weeks")]
    pub weeks: i64,
    pub items: Vec<ExamPlanItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub user_id: String,
    pub exam: String,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
    #[serde(default = "default_weeks")]
    pub weeks: i64,
}

impl PlanRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.require_text(&self.exam, "exam");
        v.check(self.hours_per_day.is_finite(), "hours_per_day", "must be a number");
        v.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyProgress {
    pub user_id: String,
    pub exam: String,
    pub topic: String,
    #[serde(default = "in_progress")]
    pub status: StudyStatus,
    #[serde(default)]
    pub score: Option<f64>,
}

impl StudyProgress {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.require_text(&self.exam, "exam");
        v.require_text(&self.topic, "topic");
        v.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockTest {
    pub user_id: String,
    pub exam: String,
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub taken_at: Option<OffsetDateTime>,
}

impl MockTest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.require_text(&self.exam, "exam");
        v.require_text(&self.title, "title");
        v.finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ExamQuery {
    pub user_id: String,
    #[serde(default)]
    pub exam: Option<String>,
}
