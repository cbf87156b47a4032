//! Study plan generation.
//!
//! Available hours are split evenly across the exam's topic list, each topic
//! gets the same review offsets, and due dates are staggered across the
//! plan window in topic order.

use std::collections::HashMap;

use lazy_static::lazy_static;
use time::{Duration, OffsetDateTime};

use super::dto::{ExamPlan, ExamPlanItem, PlanRequest, StudyStatus, MAX_PLAN_WEEKS};
use crate::math::round_to;

pub const REVIEW_OFFSETS_DAYS: [u32; 4] = [1, 3, 7, 14];

const MIN_TOPIC_HOURS: f64 = 1.0;

lazy_static! {
    static ref EXAM_TOPICS: HashMap<&'static str, Vec<&'static str>> = HashMap::from([
        (
            "UPSC",
            vec!["Polity", "History", "Geography", "Economy", "Environment", "Science"],
        ),
        ("SSC", vec!["Quant", "Reasoning", "English", "GK"]),
        ("NEET", vec!["Physics", "Chemistry", "Biology"]),
        ("GRE", vec!["Quant", "Verbal", "AWA"]),
    ]);
    static ref GENERIC_TOPICS: Vec<&'static str> = vec!["Core Concepts", "Practice", "Revision"];
}

/// Uppercase only; surrounding whitespace is part of the name.
pub fn normalize_exam(exam: &str) -> String {
    exam.to_uppercase()
}

/// Topics for a normalized exam name; unknown exams get the generic list.
pub fn topics_for(exam: &str) -> &'static [&'static str] {
    EXAM_TOPICS
        .get(exam)
        .map(Vec::as_slice)
        .unwrap_or_else(|| GENERIC_TOPICS.as_slice())
}

/// Hours per topic, never below one hour.
pub fn hours_per_topic(hours_per_day: f64, weeks: i64, topic_count: usize) -> f64 {
    let total = hours_per_day * 7.0 * weeks as f64;
    (total / topic_count as f64).max(MIN_TOPIC_HOURS)
}

/// Day offset at which topic `index` of `count` is due.
///
/// The window is clamped to `0..=MAX_PLAN_WEEKS` weeks, so negative plans are
/// due on the day they are generated.
fn due_offset_days(index: usize, count: usize, weeks: i64) -> i64 {
    let window = weeks.clamp(0, MAX_PLAN_WEEKS) * 7;
    let (position, count) = (index as i64 + 1, count as i64);
    (position * window + count - 1) / count
}

pub fn generate_plan(request: &PlanRequest, generated_at: OffsetDateTime) -> ExamPlan {
    let exam = normalize_exam(&request.exam);
    let topics = topics_for(&exam);
    let hours = round_to(
        hours_per_topic(request.hours_per_day, request.weeks, topics.len()),
        1,
    );

    let items = topics
        .iter()
        .enumerate()
        .map(|(i, topic)| ExamPlanItem {
            topic: topic.to_string(),
            hours,
            due_date: Some(
                generated_at + Duration::days(due_offset_days(i, topics.len(), request.weeks)),
            ),
            repetitions: REVIEW_OFFSETS_DAYS.to_vec(),
            status: StudyStatus::Pending,
        })
        .collect();

    ExamPlan {
        user_id: request.user_id.clone(),
        exam,
        weeks: request.weeks,
        items,
    }
}

#[cfg(test)]
mod planner_tests {
    use super::*;
    use time::macros::datetime;

    fn request(exam: &str, hours_per_day: f64, weeks: i64) -> PlanRequest {
        PlanRequest {
            user_id: "u1".into(),
            exam: exam.into(),
            hours_per_day,
            weeks,
        }
    }

    #[test]
    fn upsc_plan_splits_hours_evenly() {
        let plan = generate_plan(&request("upsc", 3.0, 4), datetime!(2026-01-01 0:00 UTC));
        assert_eq!(plan.exam, "UPSC");
        assert_eq!(plan.weeks, 4);
        let topics: Vec<_> = plan.items.iter().map(|i| i.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec!["Polity", "History", "Geography", "Economy", "Environment", "Science"]
        );
        assert!(plan.items.iter().all(|i| i.hours == 14.0));
        assert!(plan
            .items
            .iter()
            .all(|i| i.repetitions == vec![1, 3, 7, 14] && i.status == StudyStatus::Pending));
    }

    #[test]
    fn due_dates_are_staggered_across_window() {
        let start = datetime!(2026-01-01 0:00 UTC);
        let plan = generate_plan(&request("UPSC", 3.0, 4), start);
        let offsets: Vec<i64> = plan
            .items
            .iter()
            .map(|i| (i.due_date.unwrap() - start).whole_days())
            .collect();
        assert_eq!(offsets, vec![5, 10, 14, 19, 24, 28]);
    }

    #[test]
    fn unknown_exam_gets_generic_topics() {
        let plan = generate_plan(&request("bar exam", 2.0, 8), datetime!(2026-01-01 0:00 UTC));
        assert_eq!(plan.exam, "BAR EXAM");
        let topics: Vec<_> = plan.items.iter().map(|i| i.topic.as_str()).collect();
        assert_eq!(topics, vec!["Core Concepts", "Practice", "Revision"]);
        // 2 * 7 * 8 / 3 = 37.33
        assert!(plan.items.iter().all(|i| i.hours == 37.3));
    }

    #[test]
    fn tiny_or_negative_inputs_floor_at_one_hour() {
        assert_eq!(hours_per_topic(0.01, 1, 3), 1.0);
        assert_eq!(hours_per_topic(-5.0, 8, 4), 1.0);
        assert_eq!(hours_per_topic(2.0, 0, 4), 1.0);
    }

    #[test]
    fn exam_lookup_is_case_insensitive() {
        assert_eq!(topics_for(&normalize_exam("neet")), &["Physics", "Chemistry", "Biology"]);
        assert_eq!(topics_for(&normalize_exam("Ssc")).len(), 4);
    }

    #[test]
    fn padded_exam_name_is_not_trimmed() {
        assert_eq!(normalize_exam(" upsc"), " UPSC");
        assert_eq!(topics_for(&normalize_exam(" upsc")), GENERIC_TOPICS.as_slice());
    }

    #[test]
    fn negative_weeks_floor_hours_and_due_today() {
        let start = datetime!(2026-01-01 0:00 UTC);
        let plan = generate_plan(&request("GRE", 2.0, -4), start);
        assert_eq!(plan.weeks, -4);
        assert!(plan.items.iter().all(|i| i.hours == 1.0));
        assert!(plan.items.iter().all(|i| i.due_date == Some(start)));
    }

    #[test]
    fn due_window_is_capped() {
        let start = datetime!(2026-01-01 0:00 UTC);
        let plan = generate_plan(&request("NEET", 1.0, 1_000_000), start);
        let last = plan.items.last().and_then(|i| i.due_date).unwrap();
        assert_eq!((last - start).whole_days(), MAX_PLAN_WEEKS * 7);
    }
}
