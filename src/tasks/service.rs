// Task service - business logic layer
//
// All operations are scoped to the requesting user's identity; the
// repository has no unscoped access path to reach another user's tasks.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::tasks::error::TaskError;
use crate::tasks::models::{start_of_day, Task, TaskBucket, TaskFields, TaskRequest};
use crate::tasks::repository::TaskRepository;
use crate::validation::validation_messages;

/// Task service coordinating validation, ownership scoping and bucketing
#[derive(Clone)]
pub struct TaskService {
    repository: TaskRepository,
}

impl TaskService {
    /// Create a new TaskService
    pub fn new(repository: TaskRepository) -> Self {
        Self { repository }
    }

    /// Validate a request's full shape, collecting every failure message.
    /// The due date is parsed here so an unparseable value is reported
    /// together with the other violations.
    fn validate_fields(request: TaskRequest) -> Result<TaskFields, TaskError> {
        let mut messages = match request.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        };

        let due_date = match request.due_date.parse::<DateTime<Utc>>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                messages.push("due_date: must be a valid RFC 3339 timestamp".to_string());
                None
            }
        };

        let due_date = match due_date {
            Some(parsed) if messages.is_empty() => parsed,
            _ => return Err(TaskError::ValidationError(messages)),
        };

        // Tags behave as an ordered set: duplicates dropped, order kept
        let mut tags = request.tags.unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        tags.retain(|tag| seen.insert(tag.clone()));

        Ok(TaskFields {
            title: request.title,
            description: request.description,
            due_date,
            completed: request.completed.unwrap_or(false),
            priority_score: request.priority_score.unwrap_or(0.0),
            estimated_time: request.estimated_time.unwrap_or(0.0),
            tags,
        })
    }

    /// Create a task owned by the given user
    pub async fn create_task(&self, owner_id: i32, request: TaskRequest) -> Result<Task, TaskError> {
        let fields = Self::validate_fields(request)?;
        let task = self.repository.create(owner_id, fields).await?;

        tracing::info!("User {} created task {}", owner_id, task.id);
        Ok(task)
    }

    /// Tasks in the requested bucket, owner-scoped.
    ///
    /// Today/done/upcoming are filtered store-side. Overdue loads all
    /// owned tasks and filters in memory, which is how the product
    /// behaves today; it answers the same set as upcoming (flagged as an
    /// open product question in DESIGN.md).
    pub async fn tasks_in_bucket(
        &self,
        owner_id: i32,
        bucket: TaskBucket,
    ) -> Result<Vec<Task>, TaskError> {
        let now = Utc::now();
        let day_start = start_of_day(now);

        match bucket {
            TaskBucket::Today => {
                self.repository
                    .find_created_between(owner_id, day_start, day_start + Duration::days(1))
                    .await
            }
            TaskBucket::Done => self.repository.find_completed(owner_id).await,
            TaskBucket::Upcoming => self.repository.find_due_before(owner_id, day_start).await,
            TaskBucket::Overdue => {
                let tasks = self.repository.find_all_owned(owner_id).await?;
                Ok(tasks
                    .into_iter()
                    .filter(|task| TaskBucket::Overdue.matches(task, now))
                    .collect())
            }
        }
    }

    /// Mark an owned task as completed
    pub async fn mark_done(&self, owner_id: i32, task_id: Uuid) -> Result<Task, TaskError> {
        let task = self
            .repository
            .mark_done(owner_id, task_id)
            .await?
            .ok_or(TaskError::NotFound)?;

        tracing::info!("User {} completed task {}", owner_id, task_id);
        Ok(task)
    }

    /// Replace an owned task's fields after re-validating the full shape
    pub async fn update_task(
        &self,
        owner_id: i32,
        task_id: Uuid,
        request: TaskRequest,
    ) -> Result<Task, TaskError> {
        let fields = Self::validate_fields(request)?;

        self.repository
            .update(owner_id, task_id, fields)
            .await?
            .ok_or(TaskError::NotFound)
    }

    /// Delete an owned task
    pub async fn delete_task(&self, owner_id: i32, task_id: Uuid) -> Result<(), TaskError> {
        if !self.repository.delete(owner_id, task_id).await? {
            return Err(TaskError::NotFound);
        }

        tracing::info!("User {} deleted task {}", owner_id, task_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> TaskRequest {
        TaskRequest {
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            due_date: "2026-09-01T09:00:00Z".to_string(),
            completed: None,
            priority_score: Some(5.0),
            estimated_time: Some(1.5),
            tags: Some(vec!["work".to_string(), "urgent".to_string(), "work".to_string()]),
        }
    }

    #[test]
    fn valid_request_produces_fields_with_defaults() {
        let fields = TaskService::validate_fields(valid_request()).unwrap();
        assert_eq!(fields.title, "Write report");
        assert!(!fields.completed);
        assert_eq!(fields.priority_score, 5.0);
        assert_eq!(fields.tags, vec!["work".to_string(), "urgent".to_string()]);
    }

    #[test]
    fn missing_optionals_fall_back_to_defaults() {
        let request = TaskRequest {
            completed: None,
            priority_score: None,
            estimated_time: None,
            tags: None,
            ..valid_request()
        };
        let fields = TaskService::validate_fields(request).unwrap();
        assert_eq!(fields.priority_score, 0.0);
        assert_eq!(fields.estimated_time, 0.0);
        assert!(fields.tags.is_empty());
        assert!(!fields.completed);
    }

    #[test]
    fn every_violation_is_reported_at_once() {
        let request = TaskRequest {
            title: String::new(),
            description: String::new(),
            due_date: "not-a-date".to_string(),
            priority_score: Some(15.0),
            ..valid_request()
        };

        let err = TaskService::validate_fields(request).unwrap_err();
        match err {
            TaskError::ValidationError(messages) => {
                assert_eq!(messages.len(), 4, "expected all four violations: {:?}", messages);
                assert!(messages.iter().any(|m| m.starts_with("title:")));
                assert!(messages.iter().any(|m| m.starts_with("description:")));
                assert!(messages.iter().any(|m| m.starts_with("due_date:")));
                assert!(messages.iter().any(|m| m.starts_with("priority_score:")));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn title_longer_than_100_chars_is_rejected() {
        let request = TaskRequest {
            title: "x".repeat(101),
            ..valid_request()
        };
        assert!(matches!(
            TaskService::validate_fields(request),
            Err(TaskError::ValidationError(_))
        ));
    }

    #[test]
    fn out_of_range_priority_is_rejected_not_clamped() {
        let request = TaskRequest {
            priority_score: Some(15.0),
            ..valid_request()
        };
        assert!(matches!(
            TaskService::validate_fields(request),
            Err(TaskError::ValidationError(_))
        ));
    }

    #[test]
    fn unparseable_due_date_is_rejected() {
        let request = TaskRequest {
            due_date: "tomorrow".to_string(),
            ..valid_request()
        };
        let err = TaskService::validate_fields(request).unwrap_err();
        match err {
            TaskError::ValidationError(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].contains("due_date"));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}
