use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create task_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus::Enum)
                    .values([
                        TaskStatus::Todo,
                        TaskStatus::InProgress,
                        TaskStatus::Completed,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create task_priority enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskPriority::Enum)
                    .values([TaskPriority::Low, TaskPriority::Medium, TaskPriority::High])
                    .to_owned(),
            )
            .await?;

        // Create tasks table
        //
        // created_at/updated_at are stamped by the repository save path, not
        // by a database trigger; the defaults only cover rows inserted
        // outside the application.
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Tasks::Title, 100))
                    .col(text_null(Tasks::Description))
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .enumeration(
                                TaskStatus::Enum,
                                [
                                    TaskStatus::Todo,
                                    TaskStatus::InProgress,
                                    TaskStatus::Completed,
                                ],
                            )
                            .not_null()
                            .default("TODO"),
                    )
                    .col(
                        ColumnDef::new(Tasks::Priority)
                            .enumeration(
                                TaskPriority::Enum,
                                [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High],
                            )
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(date_null(Tasks::DueDate))
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_status")
                    .table(Tasks::Table)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_priority")
                    .table(Tasks::Table)
                    .col(Tasks::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_due_date")
                    .table(Tasks::Table)
                    .col(Tasks::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_created_at")
                    .table(Tasks::Table)
                    .col(Tasks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskPriority::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Status,
    Priority,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TaskStatus {
    #[sea_orm(iden = "task_status")]
    Enum,
    #[sea_orm(iden = "TODO")]
    Todo,
    #[sea_orm(iden = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(iden = "COMPLETED")]
    Completed,
}

#[derive(DeriveIden)]
enum TaskPriority {
    #[sea_orm(iden = "task_priority")]
    Enum,
    #[sea_orm(iden = "LOW")]
    Low,
    #[sea_orm(iden = "MEDIUM")]
    Medium,
    #[sea_orm(iden = "HIGH")]
    High,
}
