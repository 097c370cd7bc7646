use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskFilter, TaskPatch};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (PostgreSQL, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task; the store assigns the id and both timestamps
    async fn create(&self, input: NewTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// List tasks with optional filters, in insertion (id) order
    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>>;

    /// Apply a merge-patch to an existing task within one transaction,
    /// refreshing `updated_at`; fails with NotFound if the row is absent
    async fn update(&self, id: i64, patch: TaskPatch) -> TaskResult<Task>;

    /// Whether a task with this id exists
    async fn exists(&self, id: i64) -> TaskResult<bool>;

    /// Delete a task by ID; callers are expected to pre-check existence
    async fn delete(&self, id: i64) -> TaskResult<()>;
}
