use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::ValidatedJson;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::models::{TaskFilter, TaskPriority, TaskResponse, TaskStatus, TaskUpsert};
use crate::repository::TaskRepository;
use crate::service::TaskService;

#[derive(Debug, Deserialize)]
pub(super) struct StatusQuery {
    status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PriorityQuery {
    priority: String,
}

/// List tasks with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(TaskFilter),
    responses(
        (status = 200, description = "List of tasks", body = Vec<TaskResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(filter): Query<TaskFilter>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.list_tasks(filter).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> TaskResult<impl IntoResponse> {
    let task = service.get_task(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = TaskUpsert,
    responses(
        (status = 201, description = "Task created successfully", body = TaskResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<TaskUpsert>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// Update a task (merge-patch: absent fields keep their stored values)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskUpsert,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<TaskUpsert>,
) -> TaskResult<impl IntoResponse> {
    let task = service.update_task(id, input).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> TaskResult<impl IntoResponse> {
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a task as in progress
#[utoipa::path(
    put,
    path = "/{id}/start",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task marked as in progress", body = TaskResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn start_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> TaskResult<impl IntoResponse> {
    let task = service.mark_in_progress(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Mark a task as completed
#[utoipa::path(
    put,
    path = "/{id}/completed",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task marked as completed", body = TaskResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn complete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> TaskResult<impl IntoResponse> {
    let task = service.mark_completed(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Update the status of a task
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID"),
        ("status" = String, Query, description = "New status (TODO, IN_PROGRESS, COMPLETED)")
    ),
    responses(
        (status = 200, description = "Task status updated", body = TaskResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_task_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> TaskResult<impl IntoResponse> {
    let status = TaskStatus::from_str(&query.status)
        .map_err(|_| TaskError::Validation(format!("Invalid status value: {}", query.status)))?;

    let task = service.update_status(id, status).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Update the priority of a task
#[utoipa::path(
    put,
    path = "/{id}/priority",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID"),
        ("priority" = String, Query, description = "New priority (LOW, MEDIUM, HIGH)")
    ),
    responses(
        (status = 200, description = "Task priority updated", body = TaskResponse),
        (status = 400, description = "Invalid priority value"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_task_priority<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
    Query(query): Query<PriorityQuery>,
) -> TaskResult<impl IntoResponse> {
    let priority = TaskPriority::from_str(&query.priority).map_err(|_| {
        TaskError::Validation(format!("Invalid priority value: {}", query.priority))
    })?;

    let task = service.update_priority(id, priority).await?;
    Ok(Json(TaskResponse::from(task)))
}
