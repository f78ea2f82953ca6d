//! News endpoints. Create and update are multipart with an optional single
//! `image` file; the text fields carry the bilingual title and details.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use showroom_core::models::{Localized, NewsDraft, Pagination};
use showroom_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::response;
use crate::services::upload::{best_effort_delete, collect_multipart, store_single_image};
use crate::state::AppState;

const STORAGE_FOLDER: &str = "news";

#[derive(Debug, Deserialize)]
struct NewsForm {
    title: Localized,
    details: Localized,
}

impl NewsForm {
    fn into_draft(self) -> NewsDraft {
        NewsDraft {
            title: self.title,
            details: self.details,
        }
    }
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, HttpAppError> {
    let pagination = pagination.normalized();
    let (items, total) = state.repos.news.list(pagination).await?;
    Ok(response::list(items, total, &pagination))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let item = state
        .repos
        .news
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;
    Ok(response::ok(item))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let mut form = collect_multipart(multipart, &state.single_image_rules()).await?;
    let draft = form.parse_fields::<NewsForm>()?.into_draft();

    let image =
        store_single_image(&state.normalizer, &state.storage, STORAGE_FOLDER, &mut form, "image")
            .await?;

    match state.repos.news.create(&draft, image.as_deref()).await {
        Ok(item) => Ok(response::created(item)),
        Err(e) => {
            if let Some(url) = image {
                best_effort_delete(&state.storage, &[url]).await;
            }
            Err(e.into())
        }
    }
}

pub async fn update_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let mut form = collect_multipart(multipart, &state.single_image_rules()).await?;
    let draft = form.parse_fields::<NewsForm>()?.into_draft();

    let mut item = state.repos.news.update(id, &draft).await?;

    if let Some(url) =
        store_single_image(&state.normalizer, &state.storage, STORAGE_FOLDER, &mut form, "image")
            .await?
    {
        match state.repos.news.set_image(id, &url).await {
            Ok(old) => {
                if let Some(old_url) = old {
                    best_effort_delete(&state.storage, &[old_url]).await;
                }
                item.image = Some(url);
            }
            Err(e) => {
                best_effort_delete(&state.storage, &[url]).await;
                return Err(e.into());
            }
        }
    }

    Ok(response::ok(item))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let image = state
        .repos
        .news
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

    if let Some(url) = image {
        best_effort_delete(&state.storage, &[url]).await;
    }
    Ok(response::deleted())
}
