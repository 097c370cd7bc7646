//! Tasks Domain
//!
//! This module provides a complete domain implementation for managing tasks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP surface (axum), wire DTOs
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, defaults, merge-patch
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a database connection
//! let db = Database::connect("postgres://...").await?;
//!
//! // Create a repository and service
//! let repository = PgTaskRepository::new(db);
//! let service = TaskService::new(repository);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use models::{
    NewTask, Task, TaskFilter, TaskPatch, TaskPriority, TaskResponse, TaskStatus, TaskUpsert,
};
pub use postgres::PgTaskRepository;
pub use repository::TaskRepository;
pub use service::TaskService;
