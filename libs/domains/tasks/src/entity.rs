use crate::models::{NewTask, TaskPriority, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            priority: model.priority,
            due_date: model.due_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from NewTask to an insertable ActiveModel.
//
// The id is left unset for the database to assign; both timestamps are
// stamped here since the store owns timestamp population.
impl From<NewTask> for ActiveModel {
    fn from(input: NewTask) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            status: Set(input.status),
            priority: Set(input.priority),
            due_date: Set(input.due_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
