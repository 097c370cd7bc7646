use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskFilter, TaskPatch, TaskPriority, TaskStatus, TaskUpsert};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

// Hand-written so cloning does not require R: Clone
impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation.
    ///
    /// Absent status/priority default to TODO/MEDIUM.
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: TaskUpsert) -> TaskResult<Task> {
        validate_upsert(&input)?;

        let new_task = NewTask {
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
        };

        self.repository.create(new_task).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List tasks with filters
    pub async fn list_tasks(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        self.repository.list(filter).await
    }

    /// Update a task with merge-patch semantics: only fields present in
    /// the input overwrite the stored values.
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: i64, input: TaskUpsert) -> TaskResult<Task> {
        validate_upsert(&input)?;

        self.repository.update(id, input.into()).await
    }

    /// Delete a task; fails with NotFound rather than silently no-opping
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        if !self.repository.exists(id).await? {
            return Err(TaskError::NotFound(id));
        }

        self.repository.delete(id).await
    }

    /// Set the status of a task.
    ///
    /// Any status may follow any other; there is no transition table.
    #[instrument(skip(self), fields(task_id = %id, status = %status))]
    pub async fn update_status(&self, id: i64, status: TaskStatus) -> TaskResult<Task> {
        self.repository
            .update(
                id,
                TaskPatch {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
    }

    /// Set the priority of a task
    #[instrument(skip(self), fields(task_id = %id, priority = %priority))]
    pub async fn update_priority(&self, id: i64, priority: TaskPriority) -> TaskResult<Task> {
        self.repository
            .update(
                id,
                TaskPatch {
                    priority: Some(priority),
                    ..Default::default()
                },
            )
            .await
    }

    /// Mark a task as in progress
    pub async fn mark_in_progress(&self, id: i64) -> TaskResult<Task> {
        self.update_status(id, TaskStatus::InProgress).await
    }

    /// Mark a task as completed
    pub async fn mark_completed(&self, id: i64) -> TaskResult<Task> {
        self.update_status(id, TaskStatus::Completed).await
    }
}

/// Shared validation for the upsert DTO.
///
/// The HTTP edge already runs the validator rules; the service repeats them
/// (plus the blank-title check the length rule cannot express) so it stays
/// safe when invoked directly.
fn validate_upsert(input: &TaskUpsert) -> TaskResult<()> {
    input
        .validate()
        .map_err(|e| TaskError::Validation(e.to_string()))?;

    if input.title.trim().is_empty() {
        return Err(TaskError::Validation("Title must not be blank".to_string()));
    }

    Ok(())
}
