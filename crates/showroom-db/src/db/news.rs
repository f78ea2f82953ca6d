use chrono::{DateTime, Utc};
use showroom_core::models::{Localized, News, NewsDraft, Pagination};
use showroom_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: Uuid,
    title_en: String,
    title_ar: String,
    details_en: String,
    details_ar: String,
    image: Option<String>,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        News {
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
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const NEWS_COLUMNS: &str =
    "id, title_en, title_ar, details_en, details_ar, image, date, created_at, updated_at";

/// Repository for news items.
#[derive(Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "news", db.operation = "insert"))]
    pub async fn create(&self, draft: &NewsDraft, image: Option<&str>) -> Result<News, AppError> {
        let query = format!(
            "INSERT INTO news (title_en, title_ar, details_en, details_ar, image) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            NEWS_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, NewsRow>(&query)
            .bind(&draft.title.en)
            .bind(&draft.title.ar)
            .bind(&draft.details.en)
            .bind(&draft.details.ar)
            .bind(image)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<News>, AppError> {
        let query = format!("SELECT {} FROM news WHERE id = $1", NEWS_COLUMNS);
        let row = sqlx::query_as::<Postgres, NewsRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "select"))]
    pub async fn list(&self, pagination: Pagination) -> Result<(Vec<News>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM news ORDER BY date DESC LIMIT $1 OFFSET $2",
            NEWS_COLUMNS
        );
        let rows = sqlx::query_as::<Postgres, NewsRow>(&query)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Update text fields; the image is handled by [`Self::set_image`].
    #[tracing::instrument(skip(self, draft), fields(db.table = "news", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, draft: &NewsDraft) -> Result<News, AppError> {
        let query = format!(
            "UPDATE news SET title_en = $1, title_ar = $2, details_en = $3, details_ar = $4, \
             updated_at = NOW() WHERE id = $5 RETURNING {}",
            NEWS_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, NewsRow>(&query)
            .bind(&draft.title.en)
            .bind(&draft.title.ar)
            .bind(&draft.details.en)
            .bind(&draft.details.ar)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

        Ok(row.into())
    }

    /// Swap the image URL; returns the previous URL for storage cleanup.
    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "update", db.record_id = %id))]
    pub async fn set_image(&self, id: Uuid, image: &str) -> Result<Option<String>, AppError> {
        let previous: Option<Option<String>> = sqlx::query_scalar(
            "UPDATE news SET image = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING (SELECT image FROM news WHERE id = $2)",
        )
        .bind(image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        previous.ok_or_else(|| AppError::not_found_with_id(&id.to_string()))
    }

    /// Delete a news item; returns its image URL for storage cleanup.
    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Option<String>>, AppError> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM news WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(image)
    }
}
