//! FAQ endpoints. FAQs are plain JSON and are listed unpaginated in
//! insertion order.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use showroom_core::models::FaqDraft;
use showroom_core::AppError;
use uuid::Uuid;

use crate::error::{ApiJson, HttpAppError};
use crate::response;
use crate::state::AppState;

pub async fn list_faqs(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    let faqs = state.repos.faqs.list().await?;
    Ok(response::ok(faqs))
}

pub async fn get_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let faq = state
        .repos
        .faqs
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;
    Ok(response::ok(faq))
}

pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<FaqDraft>,
) -> Result<Response, HttpAppError> {
    let faq = state.repos.faqs.create(&draft).await?;
    Ok(response::created(faq))
}

pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ApiJson(draft): ApiJson<FaqDraft>,
) -> Result<Response, HttpAppError> {
    let faq = state.repos.faqs.update(id, &draft).await?;
    Ok(response::ok(faq))
}

pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let deleted = state.repos.faqs.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found_with_id(&id.to_string()).into());
    }
    Ok(response::deleted())
}
