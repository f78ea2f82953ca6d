//! Application state shared across handlers.

use showroom_core::Config;
use showroom_db::{
    AdminRepository, CarRepository, FaqRepository, FeedbackRepository, HomePageImagesRepository,
    MakeRepository, NewsRepository, PartnerRepository, SeasonalOfferRepository, SocialRepository,
    TermsRepository, WhatWeDoRepository,
};
use showroom_processing::{ImageNormalizer, UploadRules};
use showroom_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// All repositories over the shared pool.
#[derive(Clone)]
pub struct Repositories {
    pub cars: CarRepository,
    pub makes: MakeRepository,
    pub news: NewsRepository,
    pub offers: SeasonalOfferRepository,
    pub partners: PartnerRepository,
    pub faqs: FaqRepository,
    pub feedback: FeedbackRepository,
    pub home_page_images: HomePageImagesRepository,
    pub social: SocialRepository,
    pub terms: TermsRepository,
    pub what_we_do: WhatWeDoRepository,
    pub admins: AdminRepository,
}

impl Repositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            makes: MakeRepository::new(pool.clone()),
            news: NewsRepository::new(pool.clone()),
            offers: SeasonalOfferRepository::new(pool.clone()),
            partners: PartnerRepository::new(pool.clone()),
            faqs: FaqRepository::new(pool.clone()),
            feedback: FeedbackRepository::new(pool.clone()),
            home_page_images: HomePageImagesRepository::new(pool.clone()),
            social: SocialRepository::new(pool.clone()),
            terms: TermsRepository::new(pool.clone()),
            what_we_do: WhatWeDoRepository::new(pool.clone()),
            admins: AdminRepository::new(pool),
        }
    }
}

/// Main application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub repos: Repositories,
    pub storage: Arc<dyn Storage>,
    pub normalizer: ImageNormalizer,
    pub upload_rules: UploadRules,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, storage: Arc<dyn Storage>) -> Self {
        let normalizer = ImageNormalizer::new(
            config.max_file_size_bytes,
            config.max_image_width,
            config.jpeg_quality,
        );
        let upload_rules = UploadRules::new(
            config.max_file_size_bytes,
            config.allowed_content_types.clone(),
            config.max_images_per_car,
        );
        Self {
            repos: Repositories::new(pool.clone()),
            pool,
            storage,
            normalizer,
            upload_rules,
            config,
        }
    }

    /// Upload rules for endpoints that accept one image per field (news,
    /// offers, partners, home page slots) rather than a car image batch.
    pub fn single_image_rules(&self) -> UploadRules {
        UploadRules::new(
            self.config.max_file_size_bytes,
            self.config.allowed_content_types.clone(),
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}
