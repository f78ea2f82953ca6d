//! Car make endpoints. Makes are plain JSON, no images.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use showroom_core::AppError;
use uuid::Uuid;

use crate::error::{ApiJson, HttpAppError};
use crate::response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MakePayload {
    pub name: String,
    #[serde(default)]
    pub models: Vec<String>,
}

pub async fn list_makes(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    let makes = state.repos.makes.list().await?;
    Ok(response::ok(makes))
}

pub async fn get_make(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let make = state
        .repos
        .makes
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;
    Ok(response::ok(make))
}

pub async fn create_make(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<MakePayload>,
) -> Result<Response, HttpAppError> {
    let make = state
        .repos
        .makes
        .create(&payload.name, &payload.models)
        .await?;
    Ok(response::created(make))
}

pub async fn update_make(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<MakePayload>,
) -> Result<Response, HttpAppError> {
    let make = state
        .repos
        .makes
        .update(id, &payload.name, &payload.models)
        .await?;
    Ok(response::ok(make))
}

/// Refused with a validation error while cars still reference the make.
pub async fn delete_make(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let deleted = state.repos.makes.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found_with_id(&id.to_string()).into());
    }
    Ok(response::deleted())
}
