//! Showroom Core Library
//!
//! Shared foundation for the showroom backend: configuration, the unified
//! error type, the bilingual message catalog, and the domain models.

pub mod config;
pub mod error;
pub mod locales;
pub mod models;
pub mod storage_types;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use locales::{messages, Message};
pub use storage_types::StorageBackend;
