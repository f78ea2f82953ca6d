//! Car listing endpoints, including the multipart upload pipeline.
//!
//! Create and update accept `multipart/form-data`: text fields carry the car
//! payload (JSON-encoded values for localized pairs), `images` carries the
//! files. Images are normalized and stored before any database write, and a
//! failed write deletes whatever the request had already stored.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use showroom_core::models::{
    merge_images, reconcile_main, CarDraft, CarFilter, Condition, ImageMergeMode, Localized,
    Pagination, StoredImage,
};
use showroom_core::{messages, AppError};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::response;
use crate::services::upload::{best_effort_delete, collect_multipart, process_and_store};
use crate::state::AppState;

const SIMILAR_LIMIT: i64 = 6;
const STORAGE_FOLDER: &str = "cars";

/// Text fields of the car multipart form. `make` is the make's display name;
/// the make row is found or created on the fly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarForm {
    make: String,
    model: Localized,
    name: Localized,
    year: i32,
    condition: Condition,
    mileage: i64,
    stock_number: String,
    exterior_color: Option<Localized>,
    interior_color: Option<Localized>,
    engine: Option<Localized>,
    bhp: Option<Localized>,
    doors: Option<i32>,
    warranty: bool,
    price: f64,
    /// URL of the image to mark as main; defaults to the first image.
    main_image: Option<String>,
    /// Update only: replace the existing collection instead of appending.
    replace_images: Option<bool>,
}

impl CarForm {
    fn into_draft(self, make_id: Uuid) -> (CarDraft, Option<String>, bool) {
        let main_image = self.main_image;
        let replace = self.replace_images.unwrap_or(false);
        let draft = CarDraft {
            make_id,
            model: self.model,
            name: self.name,
            year: self.year,
            condition: self.condition,
            mileage: self.mileage,
            stock_number: self.stock_number,
            exterior_color: self.exterior_color,
            interior_color: self.interior_color,
            engine: self.engine,
            bhp: self.bhp,
            doors: self.doors,
            warranty: self.warranty,
            price: self.price,
        };
        (draft, main_image, replace)
    }
}

pub async fn list_cars(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<CarFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, HttpAppError> {
    let pagination = pagination.normalized();
    let (cars, total) = state.repos.cars.list(&filter, pagination).await?;
    Ok(response::list(cars, total, &pagination))
}

pub async fn get_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let car = state
        .repos
        .cars
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;
    Ok(response::ok(car))
}

/// Other cars of the same make, newest first, excluding the car itself.
pub async fn similar_cars(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let car = state
        .repos
        .cars
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;
    let similar = state
        .repos
        .cars
        .similar(car.make.id, id, SIMILAR_LIMIT)
        .await?;
    Ok(response::ok(similar))
}

pub async fn create_car(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let mut form = collect_multipart(multipart, &state.upload_rules).await?;
    let payload: CarForm = form.parse_fields()?;

    let files = form.take_files("images");
    if files.is_empty() {
        return Err(AppError::Validation(messages::image_required()).into());
    }

    let make = state
        .repos
        .makes
        .find_or_create(&payload.make, &payload.model.en)
        .await?;
    let (draft, main_image, _) = payload.into_draft(make.id);

    let urls = process_and_store(&state.normalizer, &state.storage, STORAGE_FOLDER, files).await?;

    let mut images = merge_images(&[], urls.clone(), ImageMergeMode::Assign);
    if let Err(e) = reconcile_main(&mut images, main_image.as_deref()) {
        best_effort_delete(&state.storage, &urls).await;
        return Err(e.into());
    }

    match state.repos.cars.create(&draft, images).await {
        Ok(car) => Ok(response::created(car)),
        Err(e) => {
            // The images are orphaned if the row never lands.
            best_effort_delete(&state.storage, &urls).await;
            Err(e.into())
        }
    }
}

pub async fn update_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let existing = state
        .repos
        .cars
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

    let mut form = collect_multipart(multipart, &state.upload_rules).await?;
    let payload: CarForm = form.parse_fields()?;

    let make = state
        .repos
        .makes
        .find_or_create(&payload.make, &payload.model.en)
        .await?;
    let (draft, main_image, replace) = payload.into_draft(make.id);

    let files = form.take_files("images");
    let new_urls =
        process_and_store(&state.normalizer, &state.storage, STORAGE_FOLDER, files).await?;

    let merged = match merged_collection(
        &existing.images,
        new_urls.clone(),
        replace,
        main_image.as_deref(),
    ) {
        Ok(merged) => merged,
        Err(e) => {
            best_effort_delete(&state.storage, &new_urls).await;
            return Err(e.into());
        }
    };

    let mut images = match merged {
        Some(images) => images,
        // No files arrived: the collection is untouched, even with
        // replaceImages set.
        None => {
            let car = state.repos.cars.update(id, &draft).await?;
            return Ok(response::ok(car));
        }
    };

    let updated = async {
        let mut car = state.repos.cars.update(id, &draft).await?;
        state.repos.cars.set_images(id, &images).await?;
        car.images = std::mem::take(&mut images);
        Ok::<_, AppError>(car)
    }
    .await;

    let car = match updated {
        Ok(car) => car,
        Err(e) => {
            best_effort_delete(&state.storage, &new_urls).await;
            return Err(e.into());
        }
    };

    // Superseded images are only deleted once the new collection is durable.
    if replace {
        let old_urls: Vec<String> = existing
            .images
            .iter()
            .map(|img| img.url.clone())
            .filter(|url| !car.images.iter().any(|img| &img.url == url))
            .collect();
        best_effort_delete(&state.storage, &old_urls).await;
    }

    Ok(response::ok(car))
}

/// Merge newly stored URLs into the existing collection and re-derive main
/// flags. `None` means no files arrived and the collection must be left
/// exactly as it is — a replace request without files never empties it.
fn merged_collection(
    existing: &[StoredImage],
    new_urls: Vec<String>,
    replace: bool,
    explicit_main: Option<&str>,
) -> Result<Option<Vec<StoredImage>>, AppError> {
    if new_urls.is_empty() {
        return Ok(None);
    }

    let mode = if replace {
        ImageMergeMode::Replace
    } else {
        ImageMergeMode::Append
    };
    let mut images = merge_images(existing, new_urls, mode);
    reconcile_main(&mut images, explicit_main)?;
    Ok(Some(images))
}

pub async fn delete_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let images: Vec<StoredImage> = state
        .repos
        .cars
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

    let urls: Vec<String> = images.into_iter().map(|img| img.url).collect();
    best_effort_delete(&state.storage, &urls).await;

    Ok(response::deleted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_form_deserializes_from_parsed_fields() {
        let value = serde_json::json!({
            "make": "Toyota",
            "model": { "en": "Corolla", "ar": "كورولا" },
            "name": { "en": "Corolla XLI", "ar": "كورولا XLI" },
            "year": 2024,
            "condition": "Brand New",
            "mileage": 0,
            "stockNumber": "EM-1001",
            "warranty": true,
            "price": 89500.0,
            "replaceImages": true
        });
        let form: CarForm = serde_json::from_value(value).unwrap();
        assert_eq!(form.make, "Toyota");
        assert_eq!(form.condition, Condition::BrandNew);
        assert_eq!(form.replace_images, Some(true));
        assert!(form.main_image.is_none());

        let make_id = Uuid::new_v4();
        let (draft, main, replace) = form.into_draft(make_id);
        assert_eq!(draft.make_id, make_id);
        assert!(main.is_none());
        assert!(replace);
    }

    #[test]
    fn replace_without_files_leaves_collection_untouched() {
        let existing = vec![
            StoredImage {
                url: "/uploads/cars/a.jpg".into(),
                is_main: true,
            },
            StoredImage::new("/uploads/cars/b.jpg"),
        ];

        // replaceImages=true with an empty batch must not produce a new
        // (empty) collection; the update is a no-op for images.
        let merged = merged_collection(&existing, Vec::new(), true, None).unwrap();
        assert!(merged.is_none());

        // Same for append mode.
        let merged = merged_collection(&existing, Vec::new(), false, None).unwrap();
        assert!(merged.is_none());
    }

    #[test]
    fn replace_with_files_supersedes_collection() {
        let existing = vec![StoredImage {
            url: "/uploads/cars/old.jpg".into(),
            is_main: true,
        }];

        let merged = merged_collection(
            &existing,
            vec!["/uploads/cars/new.jpg".into()],
            true,
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].url, "/uploads/cars/new.jpg");
        assert!(merged[0].is_main);
    }

    #[test]
    fn append_without_explicit_main_keeps_previous_main() {
        let existing = vec![
            StoredImage::new("/uploads/cars/a.jpg"),
            StoredImage {
                url: "/uploads/cars/b.jpg".into(),
                is_main: true,
            },
        ];

        let merged = merged_collection(
            &existing,
            vec!["/uploads/cars/c.jpg".into()],
            false,
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!(merged.len(), 3);
        assert!(merged[1].is_main);
        assert_eq!(merged.iter().filter(|i| i.is_main).count(), 1);
    }

    #[test]
    fn optional_localized_fields_may_be_absent() {
        let value = serde_json::json!({
            "make": "Nissan",
            "model": { "en": "Patrol", "ar": "باترول" },
            "name": { "en": "Patrol Platinum", "ar": "باترول بلاتينيوم" },
            "year": 2023,
            "condition": "Elite Approved",
            "mileage": 42000,
            "stockNumber": "EM-2002",
            "warranty": false,
            "price": 215000.0
        });
        let form: CarForm = serde_json::from_value(value).unwrap();
        assert!(form.exterior_color.is_none());
        assert!(form.doors.is_none());
        assert_eq!(form.replace_images, None);
    }
}
