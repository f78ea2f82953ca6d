//! Visitor feedback. Submission is public; listing and deletion are admin
//! operations.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use showroom_core::models::{FeedbackDraft, Pagination};
use showroom_core::{messages, AppError};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiJson, HttpAppError};
use crate::response;
use crate::state::AppState;

pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<FeedbackDraft>,
) -> Result<Response, HttpAppError> {
    if let Err(errors) = draft.validate() {
        // A broken email gets its dedicated message; anything else is
        // generic invalid input.
        let message = if errors.field_errors().contains_key("email") {
            messages::invalid_email()
        } else {
            messages::invalid_input()
        };
        return Err(AppError::Validation(message).into());
    }

    let feedback = state.repos.feedback.create(&draft).await?;
    Ok(response::created(feedback))
}

pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, HttpAppError> {
    let pagination = pagination.normalized();
    let (items, total) = state.repos.feedback.list(pagination).await?;
    Ok(response::list(items, total, &pagination))
}

pub async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let deleted = state.repos.feedback.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found_with_id(&id.to_string()).into());
    }
    Ok(response::deleted())
}
