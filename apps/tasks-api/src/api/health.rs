//! Health check endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    postgres: bool,
}

/// Create a readiness check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies the PostgreSQL connection
async fn readiness_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let postgres_healthy = database::postgres::check_health(&state.db).await.is_ok();

    Json(ReadyResponse {
        status: if postgres_healthy {
            "ready"
        } else {
            "unhealthy"
        }
        .to_string(),
        postgres: postgres_healthy,
    })
}
