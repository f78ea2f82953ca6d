//! Partner endpoints. A partner is a name, a link and a logo; the logo is
//! required on create.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use showroom_core::models::{Pagination, PartnerDraft};
use showroom_core::{messages, AppError};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::response;
use crate::services::upload::{best_effort_delete, collect_multipart, store_single_image};
use crate::state::AppState;

const STORAGE_FOLDER: &str = "partners";

#[derive(Debug, Deserialize)]
struct PartnerForm {
    name: String,
    url: String,
}

impl PartnerForm {
    fn into_draft(self) -> PartnerDraft {
        PartnerDraft {
            name: self.name,
            url: self.url,
        }
    }
}

pub async fn list_partners(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, HttpAppError> {
    let pagination = pagination.normalized();
    let (items, total) = state.repos.partners.list(pagination).await?;
    Ok(response::list(items, total, &pagination))
}

pub async fn get_partner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let item = state
        .repos
        .partners
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;
    Ok(response::ok(item))
}

pub async fn create_partner(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let mut form = collect_multipart(multipart, &state.single_image_rules()).await?;
    let draft = form.parse_fields::<PartnerForm>()?.into_draft();

    let image =
        store_single_image(&state.normalizer, &state.storage, STORAGE_FOLDER, &mut form, "image")
            .await?
            .ok_or(AppError::Validation(messages::image_required()))?;

    match state.repos.partners.create(&draft, Some(&image)).await {
        Ok(item) => Ok(response::created(item)),
        Err(e) => {
            best_effort_delete(&state.storage, &[image]).await;
            Err(e.into())
        }
    }
}

pub async fn update_partner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let mut form = collect_multipart(multipart, &state.single_image_rules()).await?;
    let draft = form.parse_fields::<PartnerForm>()?.into_draft();

    let mut item = state.repos.partners.update(id, &draft).await?;

    if let Some(url) =
        store_single_image(&state.normalizer, &state.storage, STORAGE_FOLDER, &mut form, "image")
            .await?
    {
        match state.repos.partners.set_image(id, &url).await {
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

pub async fn delete_partner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let image = state
        .repos
        .partners
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

    if let Some(url) = image {
        best_effort_delete(&state.storage, &[url]).await;
    }
    Ok(response::deleted())
}
