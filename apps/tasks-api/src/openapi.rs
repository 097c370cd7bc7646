//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tasks API",
        version = "0.1.0",
        description = "Task management API with REST support",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/tasks", api = domain_tasks::ApiDoc)
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;
