//! Service banner and health probe.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use taskboard_core::{ApiSuccess, AppError};

use crate::error::HttpAppError;
use crate::state::AppState;

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn home() -> impl IntoResponse {
    Json(ApiSuccess::new("Taskboard API"))
}

/// Readiness probe - verifies the database answers a trivial query.
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    const TIMEOUT: Duration = Duration::from_secs(5);

    match tokio::time::timeout(TIMEOUT, sqlx::query("SELECT 1").execute(&state.pool)).await {
        Ok(Ok(_)) => Json(ApiSuccess::new(serde_json::json!({
            "status": "ready",
            "database": "ready",
        })))
        .into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database readiness check failed");
            HttpAppError(AppError::Internal("Database not ready".to_string())).into_response()
        }
        Err(_) => {
            tracing::error!("Database readiness check timed out");
            HttpAppError(AppError::Internal(
                "Database readiness check timed out".to_string(),
            ))
            .into_response()
        }
    }
}
