// Task data models and DTOs

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_estimated_time, validate_priority_score};

/// Task database model.
///
/// Ownership lives on the task row itself (`owner_id`); every store call
/// carries the owner in its filter, so a task is structurally invisible
/// to any other user.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub priority_score: f64,
    pub estimated_time: f64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating or fully replacing a task.
///
/// `due_date` arrives as an RFC 3339 string and is parsed in the service
/// layer so an unparseable value joins the shape-validation messages
/// instead of failing body extraction.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    pub due_date: String,
    pub completed: Option<bool>,
    #[validate(custom = "validate_priority_score")]
    pub priority_score: Option<f64>,
    #[validate(custom = "validate_estimated_time")]
    pub estimated_time: Option<f64>,
    pub tags: Option<Vec<String>>,
}

/// Validated task fields ready for the store
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub priority_score: f64,
    pub estimated_time: f64,
    pub tags: Vec<String>,
}

/// Query buckets classifying a user's tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskBucket {
    /// Created today and not completed
    Today,
    /// Completed, regardless of dates
    Done,
    /// Due before the start of today and not completed.
    /// The counterintuitive predicate matches the observed product
    /// behavior; see DESIGN.md for the open product question.
    Upcoming,
    /// Same predicate as Upcoming, evaluated in memory
    Overdue,
}

/// Start of the UTC day containing `now`
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

impl TaskBucket {
    /// Whether a task belongs to this bucket at the given instant
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        let day_start = start_of_day(now);
        let day_end = day_start + Duration::days(1);

        match self {
            TaskBucket::Today => {
                !task.completed && task.created_at >= day_start && task.created_at < day_end
            }
            TaskBucket::Done => task.completed,
            TaskBucket::Upcoming | TaskBucket::Overdue => {
                !task.completed && task.due_date < day_start
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(created_at: DateTime<Utc>, due_date: DateTime<Utc>, completed: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            owner_id: 1,
            title: "T".to_string(),
            description: "D".to_string(),
            due_date,
            completed,
            priority_score: 0.0,
            estimated_time: 0.0,
            tags: Vec::new(),
            created_at,
        }
    }

    fn noon() -> DateTime<Utc> {
        "2026-08-29T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn today_bucket_holds_tasks_created_today_and_open() {
        let now = noon();
        let task = sample_task(now - Duration::hours(3), now + Duration::days(2), false);
        assert!(TaskBucket::Today.matches(&task, now));
    }

    #[test]
    fn today_bucket_excludes_completed_and_older_tasks() {
        let now = noon();
        let done_today = sample_task(now - Duration::hours(1), now, true);
        let yesterday = sample_task(now - Duration::days(1), now, false);
        assert!(!TaskBucket::Today.matches(&done_today, now));
        assert!(!TaskBucket::Today.matches(&yesterday, now));
    }

    #[test]
    fn today_bucket_boundary_is_start_of_day() {
        let now = noon();
        let at_midnight = sample_task(start_of_day(now), now, false);
        let just_before = sample_task(start_of_day(now) - Duration::seconds(1), now, false);
        assert!(TaskBucket::Today.matches(&at_midnight, now));
        assert!(!TaskBucket::Today.matches(&just_before, now));
    }

    #[test]
    fn done_bucket_only_cares_about_completion() {
        let now = noon();
        let done_old = sample_task(now - Duration::days(30), now - Duration::days(30), true);
        let open = sample_task(now, now, false);
        assert!(TaskBucket::Done.matches(&done_old, now));
        assert!(!TaskBucket::Done.matches(&open, now));
    }

    #[test]
    fn upcoming_and_overdue_share_the_same_predicate() {
        let now = noon();
        let past_due = sample_task(now - Duration::days(5), now - Duration::days(2), false);
        let due_today = sample_task(now, now + Duration::hours(1), false);
        let due_tomorrow = sample_task(now, now + Duration::days(1), false);

        for bucket in [TaskBucket::Upcoming, TaskBucket::Overdue] {
            assert!(bucket.matches(&past_due, now));
            assert!(!bucket.matches(&due_today, now), "due today is not before start of day");
            assert!(!bucket.matches(&due_tomorrow, now));
        }
    }

    #[test]
    fn overdue_excludes_completed_tasks() {
        let now = noon();
        let completed_past_due = sample_task(now - Duration::days(5), now - Duration::days(2), true);
        assert!(!TaskBucket::Overdue.matches(&completed_past_due, now));
    }

    #[test]
    fn start_of_day_truncates_to_midnight() {
        let now = noon();
        let start = start_of_day(now);
        assert_eq!(start.to_rfc3339(), "2026-08-29T00:00:00+00:00");
    }
}
