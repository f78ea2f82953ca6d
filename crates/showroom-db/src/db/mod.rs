//! Database repositories for the data access layer.
//!
//! Each repository owns one table (or one singleton) and returns clean domain
//! models from `showroom-core`. Bilingual text is stored as `_en`/`_ar`
//! column pairs; image collections are JSONB.

pub mod admin;
pub mod car;
pub mod content;
pub mod faq;
pub mod feedback;
pub mod make;
pub mod news;
pub mod offer;
pub mod partner;

pub use admin::AdminRepository;
pub use car::CarRepository;
pub use content::{
    HomePageImagesRepository, SocialRepository, TermsRepository, WhatWeDoRepository,
};
pub use faq::FaqRepository;
pub use feedback::FeedbackRepository;
pub use make::MakeRepository;
pub use news::NewsRepository;
pub use offer::SeasonalOfferRepository;
pub use partner::PartnerRepository;

use showroom_core::models::Localized;

/// Build an optional localized pair from a pair of nullable columns.
pub(crate) fn localized_opt(en: Option<String>, ar: Option<String>) -> Option<Localized> {
    match (en, ar) {
        (Some(en), Some(ar)) => Some(Localized { en, ar }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_opt_requires_both_languages() {
        assert!(localized_opt(Some("a".into()), Some("b".into())).is_some());
        assert!(localized_opt(Some("a".into()), None).is_none());
        assert!(localized_opt(None, None).is_none());
    }
}
