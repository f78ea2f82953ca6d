use chrono::{DateTime, Utc};
use showroom_core::models::{Faq, FaqDraft, Localized};
use showroom_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct FaqRow {
    id: Uuid,
    question_en: String,
    question_ar: String,
    answer_en: String,
    answer_ar: String,
    created_at: DateTime<Utc>,
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        Faq {
            id: row.id,
            question: Localized {
                en: row.question_en,
                ar: row.question_ar,
            },
            answer: Localized {
                en: row.answer_en,
                ar: row.answer_ar,
            },
            created_at: row.created_at,
        }
    }
}

const FAQ_COLUMNS: &str = "id, question_en, question_ar, answer_en, answer_ar, created_at";

/// Repository for FAQ entries.
#[derive(Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "faqs", db.operation = "insert"))]
    pub async fn create(&self, draft: &FaqDraft) -> Result<Faq, AppError> {
        let query = format!(
            "INSERT INTO faqs (question_en, question_ar, answer_en, answer_ar) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            FAQ_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, FaqRow>(&query)
            .bind(&draft.question.en)
            .bind(&draft.question.ar)
            .bind(&draft.answer.en)
            .bind(&draft.answer.ar)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "faqs", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Faq>, AppError> {
        let query = format!("SELECT {} FROM faqs WHERE id = $1", FAQ_COLUMNS);
        let row = sqlx::query_as::<Postgres, FaqRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self), fields(db.table = "faqs", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Faq>, AppError> {
        let query = format!("SELECT {} FROM faqs ORDER BY created_at ASC", FAQ_COLUMNS);
        let rows = sqlx::query_as::<Postgres, FaqRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "faqs", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, draft: &FaqDraft) -> Result<Faq, AppError> {
        let query = format!(
            "UPDATE faqs SET question_en = $1, question_ar = $2, answer_en = $3, answer_ar = $4 \
             WHERE id = $5 RETURNING {}",
            FAQ_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, FaqRow>(&query)
            .bind(&draft.question.en)
            .bind(&draft.question.ar)
            .bind(&draft.answer.en)
            .bind(&draft.answer.ar)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found_with_id(&id.to_string()))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "faqs", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
