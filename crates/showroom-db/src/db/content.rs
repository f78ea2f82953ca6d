//! Singleton content repositories.
//!
//! Each table holds at most one row, enforced by a unique always-true
//! `singleton` column. `find_or_create` inserts the row if absent and is safe
//! under concurrent first requests: the losing insert hits the unique
//! constraint's DO NOTHING and the follow-up select sees the winner's row.

use chrono::{DateTime, Utc};
use showroom_core::models::{
    HomePageImages, HomeSlot, Localized, Social, SocialUpdate, Terms, TermsSection, WhatWeDo,
};
use showroom_core::AppError;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const HOME_COLUMNS: &str =
    "id, what_we_do, brands, news, showroom, feedback, terms, updated_at";

/// Repository for the home page image slots.
#[derive(Clone)]
pub struct HomePageImagesRepository {
    pool: PgPool,
}

impl HomePageImagesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "home_page_images", db.operation = "upsert"))]
    pub async fn find_or_create(&self) -> Result<HomePageImages, AppError> {
        sqlx::query("INSERT INTO home_page_images (singleton) VALUES (TRUE) ON CONFLICT (singleton) DO NOTHING")
            .execute(&self.pool)
            .await?;

        let query = format!("SELECT {} FROM home_page_images", HOME_COLUMNS);
        let row = sqlx::query_as::<Postgres, HomePageImages>(&query)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Overwrite the given slots with new URLs; untouched slots keep their
    /// value. Returns the updated row.
    #[tracing::instrument(skip(self, slots), fields(db.table = "home_page_images", db.operation = "update"))]
    pub async fn set_slots(&self, slots: &[(HomeSlot, String)]) -> Result<HomePageImages, AppError> {
        // Row must exist before an UPDATE can hit it.
        self.find_or_create().await?;

        let mut assignments = vec!["updated_at = NOW()".to_string()];
        for (i, (slot, _)) in slots.iter().enumerate() {
            assignments.push(format!("{} = ${}", slot_column(*slot), i + 1));
        }

        let query = format!(
            "UPDATE home_page_images SET {} RETURNING {}",
            assignments.join(", "),
            HOME_COLUMNS
        );

        let mut q = sqlx::query_as::<Postgres, HomePageImages>(&query);
        for (_, url) in slots {
            q = q.bind(url);
        }

        let row = q.fetch_one(&self.pool).await?;
        Ok(row)
    }
}

fn slot_column(slot: HomeSlot) -> &'static str {
    match slot {
        HomeSlot::WhatWeDo => "what_we_do",
        HomeSlot::Brands => "brands",
        HomeSlot::News => "news",
        HomeSlot::Showroom => "showroom",
        HomeSlot::Feedback => "feedback",
        HomeSlot::Terms => "terms",
    }
}

const SOCIAL_COLUMNS: &str = "id, mobile, insta, tiktok, youtube, snapchat, location, \
     location_link, email, whatsapp, sales_numbers, updated_at";

/// Repository for the social/contact links singleton.
#[derive(Clone)]
pub struct SocialRepository {
    pool: PgPool,
}

impl SocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "social", db.operation = "upsert"))]
    pub async fn find_or_create(&self) -> Result<Social, AppError> {
        sqlx::query("INSERT INTO social (singleton) VALUES (TRUE) ON CONFLICT (singleton) DO NOTHING")
            .execute(&self.pool)
            .await?;

        let query = format!("SELECT {} FROM social", SOCIAL_COLUMNS);
        let row = sqlx::query_as::<Postgres, Social>(&query)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Apply a partial update; `None` fields keep their current value.
    #[tracing::instrument(skip(self, update), fields(db.table = "social", db.operation = "update"))]
    pub async fn update(&self, update: &SocialUpdate) -> Result<Social, AppError> {
        self.find_or_create().await?;

        let query = format!(
            r#"
            UPDATE social SET
                mobile = COALESCE($1, mobile),
                insta = COALESCE($2, insta),
                tiktok = COALESCE($3, tiktok),
                youtube = COALESCE($4, youtube),
                snapchat = COALESCE($5, snapchat),
                location = COALESCE($6, location),
                location_link = COALESCE($7, location_link),
                email = COALESCE($8, email),
                whatsapp = COALESCE($9, whatsapp),
                sales_numbers = COALESCE($10, sales_numbers),
                updated_at = NOW()
            RETURNING {}
            "#,
            SOCIAL_COLUMNS
        );

        let row = sqlx::query_as::<Postgres, Social>(&query)
            .bind(&update.mobile)
            .bind(&update.insta)
            .bind(&update.tiktok)
            .bind(&update.youtube)
            .bind(&update.snapchat)
            .bind(&update.location)
            .bind(&update.location_link)
            .bind(&update.email)
            .bind(&update.whatsapp)
            .bind(&update.sales_numbers)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }
}

#[derive(sqlx::FromRow)]
struct TermsRow {
    id: Uuid,
    content: Json<Vec<TermsSection>>,
    updated_at: DateTime<Utc>,
}

impl From<TermsRow> for Terms {
    fn from(row: TermsRow) -> Self {
        Terms {
            id: row.id,
            content: row.content.0,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the terms and conditions singleton.
#[derive(Clone)]
pub struct TermsRepository {
    pool: PgPool,
}

impl TermsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "terms", db.operation = "upsert"))]
    pub async fn find_or_create(&self) -> Result<Terms, AppError> {
        sqlx::query("INSERT INTO terms (singleton) VALUES (TRUE) ON CONFLICT (singleton) DO NOTHING")
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<Postgres, TermsRow>("SELECT id, content, updated_at FROM terms")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    /// Replace the section list wholesale; sections are stored sorted by
    /// their `order` field.
    #[tracing::instrument(skip(self, content), fields(db.table = "terms", db.operation = "update"))]
    pub async fn set_content(&self, mut content: Vec<TermsSection>) -> Result<Terms, AppError> {
        self.find_or_create().await?;
        content.sort_by_key(|s| s.order);

        let row = sqlx::query_as::<Postgres, TermsRow>(
            "UPDATE terms SET content = $1, updated_at = NOW() RETURNING id, content, updated_at",
        )
        .bind(Json(content))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

#[derive(sqlx::FromRow)]
struct WhatWeDoRow {
    id: Uuid,
    content_en: String,
    content_ar: String,
    updated_at: DateTime<Utc>,
}

impl From<WhatWeDoRow> for WhatWeDo {
    fn from(row: WhatWeDoRow) -> Self {
        WhatWeDo {
            id: row.id,
            content: Localized {
                en: row.content_en,
                ar: row.content_ar,
            },
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the "what we do" blurb singleton.
#[derive(Clone)]
pub struct WhatWeDoRepository {
    pool: PgPool,
}

impl WhatWeDoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "what_we_do", db.operation = "upsert"))]
    pub async fn find_or_create(&self) -> Result<WhatWeDo, AppError> {
        sqlx::query("INSERT INTO what_we_do (singleton) VALUES (TRUE) ON CONFLICT (singleton) DO NOTHING")
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<Postgres, WhatWeDoRow>(
            "SELECT id, content_en, content_ar, updated_at FROM what_we_do",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self, content), fields(db.table = "what_we_do", db.operation = "update"))]
    pub async fn set_content(&self, content: &Localized) -> Result<WhatWeDo, AppError> {
        self.find_or_create().await?;

        let row = sqlx::query_as::<Postgres, WhatWeDoRow>(
            "UPDATE what_we_do SET content_en = $1, content_ar = $2, updated_at = NOW() \
             RETURNING id, content_en, content_ar, updated_at",
        )
        .bind(&content.en)
        .bind(&content.ar)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
