// HTTP handlers for task endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::extract::Json;
use crate::response::ApiResponse;
use crate::tasks::{
    error::TaskError,
    models::{Task, TaskBucket, TaskRequest},
};
use crate::AppState;

/// Handler for POST /api/v1/todos
#[utoipa::path(
    post,
    path = "/api/v1/todos",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation failed, all messages listed"),
        (status = 403, description = "No credential presented")
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn create_task_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<TaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), TaskError> {
    let task = state.task_service.create_task(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, "Task created successfully", task)),
    ))
}

async fn bucket_response(
    state: &AppState,
    user: &AuthenticatedUser,
    bucket: TaskBucket,
    message: &str,
) -> Result<Json<ApiResponse<Vec<Task>>>, TaskError> {
    let tasks = state.task_service.tasks_in_bucket(user.user_id, bucket).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, message, tasks)))
}

/// Handler for GET /api/v1/todos/today
#[utoipa::path(
    get,
    path = "/api/v1/todos/today",
    responses((status = 200, description = "Open tasks created today", body = [Task])),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn today_tasks_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Task>>>, TaskError> {
    bucket_response(&state, &user, TaskBucket::Today, "Today's tasks").await
}

/// Handler for GET /api/v1/todos/done
#[utoipa::path(
    get,
    path = "/api/v1/todos/done",
    responses((status = 200, description = "Completed tasks", body = [Task])),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn done_tasks_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Task>>>, TaskError> {
    bucket_response(&state, &user, TaskBucket::Done, "Completed tasks").await
}

/// Handler for GET /api/v1/todos/upcoming
#[utoipa::path(
    get,
    path = "/api/v1/todos/upcoming",
    responses((status = 200, description = "Open tasks due before today", body = [Task])),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn upcoming_tasks_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Task>>>, TaskError> {
    bucket_response(&state, &user, TaskBucket::Upcoming, "Upcoming tasks").await
}

/// Handler for GET /api/v1/todos/overdue
#[utoipa::path(
    get,
    path = "/api/v1/todos/overdue",
    responses((status = 200, description = "Open tasks past their due date", body = [Task])),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn overdue_tasks_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Task>>>, TaskError> {
    bucket_response(&state, &user, TaskBucket::Overdue, "Overdue tasks").await
}

/// Handler for PATCH /api/v1/todos/:id/done
#[utoipa::path(
    patch,
    path = "/api/v1/todos/{id}/done",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task marked done", body = Task),
        (status = 404, description = "No owned task with this id")
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn mark_done_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Task>>, TaskError> {
    let task = state.task_service.mark_done(user.user_id, id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK, "Task marked as done", task)))
}

/// Handler for PUT /api/v1/todos/:id
/// Replaces the full task shape after re-validation
#[utoipa::path(
    put,
    path = "/api/v1/todos/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No owned task with this id")
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn update_task_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<TaskRequest>,
) -> Result<Json<ApiResponse<Task>>, TaskError> {
    let task = state.task_service.update_task(user.user_id, id, request).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK, "Task updated successfully", task)))
}

/// Handler for DELETE /api/v1/todos/:id
#[utoipa::path(
    delete,
    path = "/api/v1/todos/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "No owned task with this id")
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn delete_task_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, TaskError> {
    state.task_service.delete_task(user.user_id, id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        "Task deleted successfully",
        serde_json::Value::Null,
    )))
}
