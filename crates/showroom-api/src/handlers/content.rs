//! Singleton site content: home page image slots, social links, terms and
//! the "what we do" blurb. Reads find-or-create the single row so the site
//! never 404s on fresh databases.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Response;
use serde::Deserialize;
use showroom_core::models::{HomeSlot, Localized, SocialUpdate, TermsSection};
use showroom_core::{messages, AppError};

use crate::error::{ApiJson, HttpAppError};
use crate::response;
use crate::services::upload::{best_effort_delete, collect_multipart, process_and_store};
use crate::state::AppState;

const HOME_FOLDER: &str = "home";

// --- Home page images ---

pub async fn get_home_page_images(
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let images = state.repos.home_page_images.find_or_create().await?;
    Ok(response::ok(images))
}

/// Replace one or more named slots. Each multipart file field must be a slot
/// name (`whatWeDo`, `brands`, ...); superseded slot images are deleted only
/// after the new URLs are durable.
pub async fn update_home_page_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let mut form = collect_multipart(multipart, &state.single_image_rules()).await?;

    let files = std::mem::take(&mut form.files);
    if files.is_empty() {
        return Err(AppError::Validation(messages::image_required()).into());
    }

    let mut slots = Vec::with_capacity(files.len());
    for file in &files {
        let slot = HomeSlot::from_field_name(&file.field_name).ok_or_else(|| {
            tracing::debug!(field = %file.field_name, "Unknown home page slot");
            AppError::Validation(messages::invalid_input())
        })?;
        slots.push(slot);
    }

    let current = state.repos.home_page_images.find_or_create().await?;

    let urls = process_and_store(&state.normalizer, &state.storage, HOME_FOLDER, files).await?;
    let assignments: Vec<(HomeSlot, String)> = slots.iter().copied().zip(urls.clone()).collect();

    let updated = match state.repos.home_page_images.set_slots(&assignments).await {
        Ok(updated) => updated,
        Err(e) => {
            best_effort_delete(&state.storage, &urls).await;
            return Err(e.into());
        }
    };

    let old_urls: Vec<String> = slots
        .iter()
        .filter_map(|slot| current.slot(*slot).map(str::to_string))
        .collect();
    best_effort_delete(&state.storage, &old_urls).await;

    Ok(response::ok(updated))
}

// --- Social links ---

pub async fn get_social(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    let social = state.repos.social.find_or_create().await?;
    Ok(response::ok(social))
}

pub async fn update_social(
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<SocialUpdate>,
) -> Result<Response, HttpAppError> {
    let social = state.repos.social.update(&update).await?;
    Ok(response::ok(social))
}

// --- Terms and conditions ---

#[derive(Debug, Deserialize)]
pub struct TermsPayload {
    pub content: Vec<TermsSection>,
}

pub async fn get_terms(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    let terms = state.repos.terms.find_or_create().await?;
    Ok(response::ok(terms))
}

pub async fn update_terms(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TermsPayload>,
) -> Result<Response, HttpAppError> {
    let terms = state.repos.terms.set_content(payload.content).await?;
    Ok(response::ok(terms))
}

// --- What we do ---

#[derive(Debug, Deserialize)]
pub struct WhatWeDoPayload {
    pub content: Localized,
}

pub async fn get_what_we_do(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    let blurb = state.repos.what_we_do.find_or_create().await?;
    Ok(response::ok(blurb))
}

pub async fn update_what_we_do(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<WhatWeDoPayload>,
) -> Result<Response, HttpAppError> {
    let blurb = state.repos.what_we_do.set_content(&payload.content).await?;
    Ok(response::ok(blurb))
}
