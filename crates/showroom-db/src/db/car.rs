use chrono::{DateTime, Utc};
use showroom_core::models::{Car, CarDraft, CarFilter, Localized, MakeRef, Pagination, StoredImage};
use showroom_core::AppError;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::localized_opt;

const CAR_COLUMNS: &str = "c.id, c.make_id, m.name AS make_name, c.model_en, c.model_ar, \
     c.name_en, c.name_ar, c.year, c.condition, c.mileage, c.stock_number, \
     c.exterior_color_en, c.exterior_color_ar, c.interior_color_en, c.interior_color_ar, \
     c.engine_en, c.engine_ar, c.bhp_en, c.bhp_ar, c.doors, c.warranty, c.price, \
     c.images, c.created_at, c.updated_at";

#[derive(sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    make_id: Uuid,
    make_name: String,
    model_en: String,
    model_ar: String,
    name_en: String,
    name_ar: String,
    year: i32,
    condition: String,
    mileage: i64,
    stock_number: String,
    exterior_color_en: Option<String>,
    exterior_color_ar: Option<String>,
    interior_color_en: Option<String>,
    interior_color_ar: Option<String>,
    engine_en: Option<String>,
    engine_ar: Option<String>,
    bhp_en: Option<String>,
    bhp_ar: Option<String>,
    doors: Option<i32>,
    warranty: bool,
    price: f64,
    images: Json<Vec<StoredImage>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CarRow {
    fn into_car(self) -> Result<Car, AppError> {
        let condition = self
            .condition
            .parse()
            .map_err(|e: String| AppError::Internal(e))?;
        Ok(Car {
            id: self.id,
            make: MakeRef {
                id: self.make_id,
                name: self.make_name,
            },
            model: Localized {
                en: self.model_en,
                ar: self.model_ar,
            },
            name: Localized {
                en: self.name_en,
                ar: self.name_ar,
            },
            year: self.year,
            condition,
            mileage: self.mileage,
            stock_number: self.stock_number,
            exterior_color: localized_opt(self.exterior_color_en, self.exterior_color_ar),
            interior_color: localized_opt(self.interior_color_en, self.interior_color_ar),
            engine: localized_opt(self.engine_en, self.engine_ar),
            bhp: localized_opt(self.bhp_en, self.bhp_ar),
            doors: self.doors,
            warranty: self.warranty,
            price: self.price,
            images: self.images.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for car listings.
#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft, images), fields(db.table = "cars", db.operation = "insert"))]
    pub async fn create(&self, draft: &CarDraft, images: Vec<StoredImage>) -> Result<Car, AppError> {
        // RETURNING cannot join, so the make name comes from a subselect.
        let query = r#"
            INSERT INTO cars (
                make_id, model_en, model_ar, name_en, name_ar, year, condition,
                mileage, stock_number, exterior_color_en, exterior_color_ar,
                interior_color_en, interior_color_ar, engine_en, engine_ar,
                bhp_en, bhp_ar, doors, warranty, price, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21)
            RETURNING id, make_id,
                (SELECT name FROM makes WHERE id = cars.make_id) AS make_name,
                model_en, model_ar, name_en, name_ar, year, condition, mileage,
                stock_number, exterior_color_en, exterior_color_ar,
                interior_color_en, interior_color_ar, engine_en, engine_ar,
                bhp_en, bhp_ar, doors, warranty, price, images, created_at, updated_at
            "#;

        let row = bind_draft(sqlx::query_as::<Postgres, CarRow>(query), draft)
            .bind(Json(images))
            .fetch_one(&self.pool)
            .await?;

        row.into_car()
    }

    #[tracing::instrument(skip(self), fields(db.table = "cars", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let query = format!(
            "SELECT {} FROM cars c JOIN makes m ON m.id = c.make_id WHERE c.id = $1",
            CAR_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, CarRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CarRow::into_car).transpose()
    }

    /// List cars newest-first with optional filters; returns the page plus
    /// the total matching count for the pagination envelope.
    #[tracing::instrument(skip(self, filter), fields(db.table = "cars", db.operation = "select"))]
    pub async fn list(
        &self,
        filter: &CarFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Car>, i64), AppError> {
        let mut conditions = Vec::new();
        let mut bind_index = 1;

        if filter.make.is_some() {
            conditions.push(format!("c.make_id = ${}", bind_index));
            bind_index += 1;
        }
        if filter.model.is_some() {
            conditions.push(format!(
                "(c.model_en ILIKE ${i} OR c.model_ar ILIKE ${i})",
                i = bind_index
            ));
            bind_index += 1;
        }
        if filter.year.is_some() {
            conditions.push(format!("c.year = ${}", bind_index));
            bind_index += 1;
        }
        if filter.condition.is_some() {
            conditions.push(format!("c.condition = ${}", bind_index));
            bind_index += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let model_pattern = filter.model.as_ref().map(|m| format!("%{}%", m));

        let count_query = format!(
            "SELECT COUNT(*) FROM cars c JOIN makes m ON m.id = c.make_id{}",
            where_clause
        );
        let mut count = sqlx::query_scalar::<Postgres, i64>(&count_query);
        if let Some(make_id) = filter.make {
            count = count.bind(make_id);
        }
        if let Some(ref pattern) = model_pattern {
            count = count.bind(pattern);
        }
        if let Some(year) = filter.year {
            count = count.bind(year);
        }
        if let Some(condition) = filter.condition {
            count = count.bind(condition.as_str());
        }
        let total = count.fetch_one(&self.pool).await?;

        let list_query = format!(
            "SELECT {} FROM cars c JOIN makes m ON m.id = c.make_id{} \
             ORDER BY c.created_at DESC LIMIT ${} OFFSET ${}",
            CAR_COLUMNS,
            where_clause,
            bind_index,
            bind_index + 1
        );
        let mut list = sqlx::query_as::<Postgres, CarRow>(&list_query);
        if let Some(make_id) = filter.make {
            list = list.bind(make_id);
        }
        if let Some(ref pattern) = model_pattern {
            list = list.bind(pattern);
        }
        if let Some(year) = filter.year {
            list = list.bind(year);
        }
        if let Some(condition) = filter.condition {
            list = list.bind(condition.as_str());
        }
        let rows = list
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        let cars = rows
            .into_iter()
            .map(CarRow::into_car)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((cars, total))
    }

    /// Up to `limit` other cars of the same make, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "cars", db.operation = "select"))]
    pub async fn similar(&self, make_id: Uuid, exclude: Uuid, limit: i64) -> Result<Vec<Car>, AppError> {
        let query = format!(
            "SELECT {} FROM cars c JOIN makes m ON m.id = c.make_id \
             WHERE c.make_id = $1 AND c.id != $2 ORDER BY c.created_at DESC LIMIT $3",
            CAR_COLUMNS
        );
        let rows = sqlx::query_as::<Postgres, CarRow>(&query)
            .bind(make_id)
            .bind(exclude)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CarRow::into_car).collect()
    }

    /// Update scalar fields; images are untouched (use [`Self::set_images`]).
    #[tracing::instrument(skip(self, draft), fields(db.table = "cars", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, draft: &CarDraft) -> Result<Car, AppError> {
        let query = r#"
            UPDATE cars SET
                make_id = $1, model_en = $2, model_ar = $3, name_en = $4, name_ar = $5,
                year = $6, condition = $7, mileage = $8, stock_number = $9,
                exterior_color_en = $10, exterior_color_ar = $11,
                interior_color_en = $12, interior_color_ar = $13,
                engine_en = $14, engine_ar = $15, bhp_en = $16, bhp_ar = $17,
                doors = $18, warranty = $19, price = $20, updated_at = NOW()
            WHERE id = $21
            RETURNING id, make_id,
                (SELECT name FROM makes WHERE id = cars.make_id) AS make_name,
                model_en, model_ar, name_en, name_ar, year, condition, mileage,
                stock_number, exterior_color_en, exterior_color_ar,
                interior_color_en, interior_color_ar, engine_en, engine_ar,
                bhp_en, bhp_ar, doors, warranty, price, images, created_at, updated_at
            "#;

        let row = bind_draft(sqlx::query_as::<Postgres, CarRow>(query), draft)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

        row.into_car()
    }

    /// Replace the image collection wholesale.
    #[tracing::instrument(skip(self, images), fields(db.table = "cars", db.operation = "update", db.record_id = %id))]
    pub async fn set_images(&self, id: Uuid, images: &[StoredImage]) -> Result<(), AppError> {
        let rows_affected =
            sqlx::query("UPDATE cars SET images = $1, updated_at = NOW() WHERE id = $2")
                .bind(Json(images))
                .bind(id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found_with_id(&id.to_string()));
        }
        Ok(())
    }

    /// Delete a car; returns its images so the caller can clean up storage.
    #[tracing::instrument(skip(self), fields(db.table = "cars", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Vec<StoredImage>>, AppError> {
        let images: Option<Json<Vec<StoredImage>>> =
            sqlx::query_scalar("DELETE FROM cars WHERE id = $1 RETURNING images")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(images.map(|j| j.0))
    }
}

fn bind_draft<'q>(
    query: sqlx::query::QueryAs<'q, Postgres, CarRow, sqlx::postgres::PgArguments>,
    draft: &'q CarDraft,
) -> sqlx::query::QueryAs<'q, Postgres, CarRow, sqlx::postgres::PgArguments> {
    query
        .bind(draft.make_id)
        .bind(&draft.model.en)
        .bind(&draft.model.ar)
        .bind(&draft.name.en)
        .bind(&draft.name.ar)
        .bind(draft.year)
        .bind(draft.condition.as_str())
        .bind(draft.mileage)
        .bind(&draft.stock_number)
        .bind(draft.exterior_color.as_ref().map(|l| l.en.as_str()))
        .bind(draft.exterior_color.as_ref().map(|l| l.ar.as_str()))
        .bind(draft.interior_color.as_ref().map(|l| l.en.as_str()))
        .bind(draft.interior_color.as_ref().map(|l| l.ar.as_str()))
        .bind(draft.engine.as_ref().map(|l| l.en.as_str()))
        .bind(draft.engine.as_ref().map(|l| l.ar.as_str()))
        .bind(draft.bhp.as_ref().map(|l| l.en.as_str()))
        .bind(draft.bhp.as_ref().map(|l| l.ar.as_str()))
        .bind(draft.doors)
        .bind(draft.warranty)
        .bind(draft.price)
}
