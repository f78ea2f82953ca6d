use showroom_core::models::Make;
use showroom_core::{messages, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for car makes and their model lists.
#[derive(Clone)]
pub struct MakeRepository {
    pool: PgPool,
}

impl MakeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "makes", db.operation = "insert"))]
    pub async fn create(&self, name: &str, models: &[String]) -> Result<Make, AppError> {
        let make = sqlx::query_as::<Postgres, Make>(
            r#"
            INSERT INTO makes (name, models)
            VALUES ($1, $2)
            RETURNING id, name, models, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(models)
        .fetch_one(&self.pool)
        .await?;

        Ok(make)
    }

    /// Look up a make by name (case-insensitive), creating it if absent, and
    /// ensure `model` is in its model list. Race-safe: the upsert is a single
    /// statement against the `LOWER(name)` unique index.
    #[tracing::instrument(skip(self), fields(db.table = "makes", db.operation = "upsert"))]
    pub async fn find_or_create(&self, name: &str, model: &str) -> Result<Make, AppError> {
        let make = sqlx::query_as::<Postgres, Make>(
            r#"
            INSERT INTO makes (name, models)
            VALUES ($1, ARRAY[$2])
            ON CONFLICT (LOWER(name)) DO UPDATE SET
                models = CASE
                    WHEN makes.models @> ARRAY[$2] THEN makes.models
                    ELSE array_append(makes.models, $2)
                END,
                updated_at = NOW()
            RETURNING id, name, models, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(model)
        .fetch_one(&self.pool)
        .await?;

        Ok(make)
    }

    #[tracing::instrument(skip(self), fields(db.table = "makes", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Make>, AppError> {
        let make = sqlx::query_as::<Postgres, Make>(
            "SELECT id, name, models, created_at, updated_at FROM makes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(make)
    }

    #[tracing::instrument(skip(self), fields(db.table = "makes", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Make>, AppError> {
        let makes = sqlx::query_as::<Postgres, Make>(
            "SELECT id, name, models, created_at, updated_at FROM makes ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(makes)
    }

    #[tracing::instrument(skip(self), fields(db.table = "makes", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, name: &str, models: &[String]) -> Result<Make, AppError> {
        let make = sqlx::query_as::<Postgres, Make>(
            r#"
            UPDATE makes SET name = $1, models = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, models, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(models)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

        Ok(make)
    }

    /// Delete a make. Refused while cars still reference it.
    #[tracing::instrument(skip(self), fields(db.table = "makes", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let car_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE make_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if car_count > 0 {
            return Err(AppError::Validation(messages::invalid_input()));
        }

        let rows_affected = sqlx::query("DELETE FROM makes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
