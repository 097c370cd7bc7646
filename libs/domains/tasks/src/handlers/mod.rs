mod rest;

use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{TaskPriority, TaskResponse, TaskStatus, TaskUpsert};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::list_tasks,
        rest::get_task,
        rest::create_task,
        rest::update_task,
        rest::delete_task,
        rest::start_task,
        rest::complete_task,
        rest::update_task_status,
        rest::update_task_priority,
    ),
    components(
        schemas(TaskResponse, TaskUpsert, TaskStatus, TaskPriority)
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the tasks router.
///
/// Mounted by the app under `/api/v1/tasks`.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(rest::list_tasks).post(rest::create_task))
        .route(
            "/{id}",
            get(rest::get_task)
                .put(rest::update_task)
                .delete(rest::delete_task),
        )
        .route("/{id}/start", put(rest::start_task))
        .route("/{id}/completed", put(rest::complete_task))
        .route("/{id}/status", put(rest::update_task_status))
        .route("/{id}/priority", put(rest::update_task_priority))
        .with_state(shared_service)
}
