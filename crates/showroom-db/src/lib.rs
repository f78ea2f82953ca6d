//! Showroom Database Library
//!
//! Repositories for catalog entities (cars, makes, news, offers, partners,
//! FAQs, feedback), the site content singletons, and admin accounts.

pub mod db;

pub use db::{
    AdminRepository, CarRepository, FaqRepository, FeedbackRepository, HomePageImagesRepository,
    MakeRepository, NewsRepository, PartnerRepository, SeasonalOfferRepository, SocialRepository,
    TermsRepository, WhatWeDoRepository,
};
