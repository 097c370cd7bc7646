//! Tasks API routes
//!
//! This module wires up the tasks domain to HTTP routes.

use axum::Router;
use domain_tasks::{PgTaskRepository, TaskService, handlers};

use crate::state::AppState;

/// Create tasks router
pub fn router(state: &AppState) -> Router {
    // Create the PostgreSQL repository
    let repository = PgTaskRepository::new(state.db.clone());

    // Create the service
    let service = TaskService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
