use showroom_core::models::{Pagination, Partner, PartnerDraft};
use showroom_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const PARTNER_COLUMNS: &str = "id, name, url, image, created_at, updated_at";

/// Repository for brand partners.
#[derive(Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "partners", db.operation = "insert"))]
    pub async fn create(
        &self,
        draft: &PartnerDraft,
        image: Option<&str>,
    ) -> Result<Partner, AppError> {
        let query = format!(
            "INSERT INTO partners (name, url, image) VALUES ($1, $2, $3) RETURNING {}",
            PARTNER_COLUMNS
        );
        let partner = sqlx::query_as::<Postgres, Partner>(&query)
            .bind(&draft.name)
            .bind(&draft.url)
            .bind(image)
            .fetch_one(&self.pool)
            .await?;

        Ok(partner)
    }

    #[tracing::instrument(skip(self), fields(db.table = "partners", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Partner>, AppError> {
        let query = format!("SELECT {} FROM partners WHERE id = $1", PARTNER_COLUMNS);
        let partner = sqlx::query_as::<Postgres, Partner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(partner)
    }

    #[tracing::instrument(skip(self), fields(db.table = "partners", db.operation = "select"))]
    pub async fn list(&self, pagination: Pagination) -> Result<(Vec<Partner>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM partners")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM partners ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            PARTNER_COLUMNS
        );
        let partners = sqlx::query_as::<Postgres, Partner>(&query)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((partners, total))
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "partners", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, draft: &PartnerDraft) -> Result<Partner, AppError> {
        let query = format!(
            "UPDATE partners SET name = $1, url = $2, updated_at = NOW() WHERE id = $3 \
             RETURNING {}",
            PARTNER_COLUMNS
        );
        let partner = sqlx::query_as::<Postgres, Partner>(&query)
            .bind(&draft.name)
            .bind(&draft.url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

        Ok(partner)
    }

    /// Swap the image URL; returns the previous URL for storage cleanup.
    #[tracing::instrument(skip(self), fields(db.table = "partners", db.operation = "update", db.record_id = %id))]
    pub async fn set_image(&self, id: Uuid, image: &str) -> Result<Option<String>, AppError> {
        let previous: Option<Option<String>> = sqlx::query_scalar(
            "UPDATE partners SET image = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING (SELECT image FROM partners WHERE id = $2)",
        )
        .bind(image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        previous.ok_or_else(|| AppError::not_found_with_id(&id.to_string()))
    }

    /// Delete a partner; returns its image URL for storage cleanup.
    #[tracing::instrument(skip(self), fields(db.table = "partners", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Option<String>>, AppError> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM partners WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(image)
    }
}
