// Database repository for task records
//
// Every query carries owner_id in its WHERE clause. There is no
// unscoped read or write path.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::tasks::error::TaskError;
use crate::tasks::models::{Task, TaskFields};

/// Repository for task operations
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new TaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new task for the given owner
    pub async fn create(&self, owner_id: i32, fields: TaskFields) -> Result<Task, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, due_date, completed,
                               priority_score, estimated_time, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, title, description, due_date, completed,
                      priority_score, estimated_time, tags, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.due_date)
        .bind(fields.completed)
        .bind(fields.priority_score)
        .bind(fields.estimated_time)
        .bind(&fields.tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// All tasks owned by the user, creation order
    pub async fn find_all_owned(&self, owner_id: i32) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, completed,
                   priority_score, estimated_time, tags, created_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Open tasks created within [day_start, day_end)
    pub async fn find_created_between(
        &self,
        owner_id: i32,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, completed,
                   priority_score, estimated_time, tags, created_at
            FROM tasks
            WHERE owner_id = $1 AND completed = FALSE
              AND created_at >= $2 AND created_at < $3
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Completed tasks
    pub async fn find_completed(&self, owner_id: i32) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, completed,
                   priority_score, estimated_time, tags, created_at
            FROM tasks
            WHERE owner_id = $1 AND completed = TRUE
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Open tasks due strictly before the cutoff
    pub async fn find_due_before(
        &self,
        owner_id: i32,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, completed,
                   priority_score, estimated_time, tags, created_at
            FROM tasks
            WHERE owner_id = $1 AND completed = FALSE AND due_date < $2
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Set completed = TRUE; None when no owned task matches the id
    pub async fn mark_done(&self, owner_id: i32, task_id: Uuid) -> Result<Option<Task>, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET completed = TRUE
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, due_date, completed,
                      priority_score, estimated_time, tags, created_at
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Replace all mutable fields; None when no owned task matches the id
    pub async fn update(
        &self,
        owner_id: i32,
        task_id: Uuid,
        fields: TaskFields,
    ) -> Result<Option<Task>, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, due_date = $5, completed = $6,
                priority_score = $7, estimated_time = $8, tags = $9
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, due_date, completed,
                      priority_score, estimated_time, tags, created_at
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.due_date)
        .bind(fields.completed)
        .bind(fields.priority_score)
        .bind(fields.estimated_time)
        .bind(&fields.tags)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Delete an owned task; false when no row matched
    pub async fn delete(&self, owner_id: i32, task_id: Uuid) -> Result<bool, TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
