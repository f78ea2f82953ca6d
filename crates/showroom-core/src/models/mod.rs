//! Domain models shared across the workspace.

pub mod admin;
pub mod car;
pub mod content;
pub mod faq;
pub mod feedback;
pub mod image;
pub mod make;
pub mod news;
pub mod offer;
pub mod partner;

pub use admin::Admin;
pub use car::{Car, CarDraft, CarFilter, Condition, MakeRef};
pub use content::{HomePageImages, HomeSlot, Social, SocialUpdate, Terms, TermsSection, WhatWeDo};
pub use faq::{Faq, FaqDraft};
pub use feedback::{Feedback, FeedbackDraft};
pub use image::{merge_images, reconcile_main, ImageMergeMode, StoredImage};
pub use make::Make;
pub use news::{News, NewsDraft};
pub use offer::{SeasonalOffer, SeasonalOfferDraft};
pub use partner::{Partner, PartnerDraft};

use serde::{Deserialize, Serialize};

/// An English/Arabic localized text pair, stored and served together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub ar: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }
}

/// Page/limit query parameters shared by list endpoints.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl Pagination {
    /// Clamp to sane bounds; page and limit are at least 1.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 100),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Pagination envelope returned alongside list data.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub page_size: i64,
}

impl PageInfo {
    pub fn new(pagination: &Pagination, total: i64) -> Self {
        Self {
            current_page: pagination.page,
            total_pages: (total + pagination.limit - 1) / pagination.limit,
            page_size: pagination.limit,
        }
    }
}
