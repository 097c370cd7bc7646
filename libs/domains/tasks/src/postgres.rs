use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionError, TransactionTrait,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task, TaskFilter, TaskPatch, TaskStatus},
    repository::TaskRepository,
};

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        // The conversion leaves the id unset and stamps both timestamps
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = %model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let mut query = entity::Entity::find();

        // Apply filters
        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        if let Some(priority) = filter.priority {
            query = query.filter(entity::Column::Priority.eq(priority));
        }

        if let Some(title) = filter.title {
            query = query.filter(Expr::col(entity::Column::Title).ilike(format!("%{}%", title)));
        }

        if let Some(due_before) = filter.due_before {
            query = query.filter(entity::Column::DueDate.lt(due_before));
        }

        // The overdue flag only narrows when set to true
        if filter.overdue.unwrap_or(false) {
            let today = chrono::Utc::now().date_naive();
            query = query
                .filter(entity::Column::DueDate.lt(today))
                .filter(entity::Column::Status.ne(TaskStatus::Completed));
        }

        if let Some(created_after) = filter.created_after {
            query = query.filter(entity::Column::CreatedAt.gte(created_after));
        }

        // Insertion order
        query = query.order_by_asc(entity::Column::Id);

        let models = query.all(&self.db).await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> TaskResult<Task> {
        // Fetch, merge, and persist inside one transaction so concurrent
        // writers to the same row cannot interleave a lost update.
        let task = self
            .db
            .transaction::<_, Task, TaskError>(|txn| {
                Box::pin(async move {
                    let model = entity::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or(TaskError::NotFound(id))?;

                    let mut task: Task = model.into();
                    task.apply_patch(patch);
                    // The store owns timestamp population: refresh on every write
                    task.updated_at = chrono::Utc::now();

                    let active_model = entity::ActiveModel {
                        id: Set(task.id),
                        title: Set(task.title.clone()),
                        description: Set(task.description.clone()),
                        status: Set(task.status),
                        priority: Set(task.priority),
                        due_date: Set(task.due_date),
                        created_at: Set(task.created_at.into()),
                        updated_at: Set(task.updated_at.into()),
                    };

                    let updated_model = active_model.update(txn).await?;
                    Ok(updated_model.into())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(err) => TaskError::from(err),
                TransactionError::Transaction(err) => err,
            })?;

        tracing::info!(task_id = %id, "Updated task");
        Ok(task)
    }

    async fn exists(&self, id: i64) -> TaskResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;

        Ok(count > 0)
    }

    async fn delete(&self, id: i64) -> TaskResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
        } else {
            tracing::debug!(task_id = %id, "Delete matched no rows");
        }

        Ok(())
    }
}
