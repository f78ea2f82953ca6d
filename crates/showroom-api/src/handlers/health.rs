//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::error::HttpAppError;
use crate::response;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    environment: String,
}

/// Reports liveness and verifies the database connection.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(response::ok(HealthStatus {
        status: "ok",
        environment: state.config.environment.clone(),
    }))
}
