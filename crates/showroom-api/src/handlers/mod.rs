//! HTTP handlers, one module per resource.

pub mod auth;
pub mod cars;
pub mod content;
pub mod faqs;
pub mod feedback;
pub mod health;
pub mod makes;
pub mod news;
pub mod offers;
pub mod partners;
