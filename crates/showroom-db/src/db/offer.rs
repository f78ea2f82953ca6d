use chrono::{DateTime, Utc};
use showroom_core::models::{Localized, Pagination, SeasonalOffer, SeasonalOfferDraft};
use showroom_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: Uuid,
    title_en: String,
    title_ar: String,
    details_en: String,
    details_ar: String,
    image: Option<String>,
    show: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OfferRow> for SeasonalOffer {
    fn from(row: OfferRow) -> Self {
        SeasonalOffer {
            id: row.id,
            title: Localized {
                en: row.title_en,
                ar: row.title_ar,
            },
            details: Localized {
                en: row.details_en,
                ar: row.details_ar,
            },
            image: row.image,
            show: row.show,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const OFFER_COLUMNS: &str =
    "id, title_en, title_ar, details_en, details_ar, image, show, created_at, updated_at";

/// Repository for seasonal offers.
#[derive(Clone)]
pub struct SeasonalOfferRepository {
    pool: PgPool,
}

impl SeasonalOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "seasonal_offers", db.operation = "insert"))]
    pub async fn create(
        &self,
        draft: &SeasonalOfferDraft,
        image: Option<&str>,
    ) -> Result<SeasonalOffer, AppError> {
        let query = format!(
            "INSERT INTO seasonal_offers (title_en, title_ar, details_en, details_ar, image, show) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            OFFER_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, OfferRow>(&query)
            .bind(&draft.title.en)
            .bind(&draft.title.ar)
            .bind(&draft.details.en)
            .bind(&draft.details.ar)
            .bind(image)
            .bind(draft.show)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "seasonal_offers", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<SeasonalOffer>, AppError> {
        let query = format!("SELECT {} FROM seasonal_offers WHERE id = $1", OFFER_COLUMNS);
        let row = sqlx::query_as::<Postgres, OfferRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List offers newest-first. `visible_only` restricts to `show = true`
    /// for the public site; the admin panel lists everything.
    #[tracing::instrument(skip(self), fields(db.table = "seasonal_offers", db.operation = "select"))]
    pub async fn list(
        &self,
        visible_only: bool,
        pagination: Pagination,
    ) -> Result<(Vec<SeasonalOffer>, i64), AppError> {
        let where_clause = if visible_only { " WHERE show = TRUE" } else { "" };

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM seasonal_offers{}", where_clause))
                .fetch_one(&self.pool)
                .await?;

        let query = format!(
            "SELECT {} FROM seasonal_offers{} ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            OFFER_COLUMNS, where_clause
        );
        let rows = sqlx::query_as::<Postgres, OfferRow>(&query)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "seasonal_offers", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        draft: &SeasonalOfferDraft,
    ) -> Result<SeasonalOffer, AppError> {
        let query = format!(
            "UPDATE seasonal_offers SET title_en = $1, title_ar = $2, details_en = $3, \
             details_ar = $4, show = $5, updated_at = NOW() WHERE id = $6 RETURNING {}",
            OFFER_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, OfferRow>(&query)
            .bind(&draft.title.en)
            .bind(&draft.title.ar)
            .bind(&draft.details.en)
            .bind(&draft.details.ar)
            .bind(draft.show)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

        Ok(row.into())
    }

    /// Swap the image URL; returns the previous URL for storage cleanup.
    #[tracing::instrument(skip(self), fields(db.table = "seasonal_offers", db.operation = "update", db.record_id = %id))]
    pub async fn set_image(&self, id: Uuid, image: &str) -> Result<Option<String>, AppError> {
        let previous: Option<Option<String>> = sqlx::query_scalar(
            "UPDATE seasonal_offers SET image = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING (SELECT image FROM seasonal_offers WHERE id = $2)",
        )
        .bind(image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        previous.ok_or_else(|| AppError::not_found_with_id(&id.to_string()))
    }

    /// Delete an offer; returns its image URL for storage cleanup.
    #[tracing::instrument(skip(self), fields(db.table = "seasonal_offers", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Option<String>>, AppError> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM seasonal_offers WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(image)
    }
}
