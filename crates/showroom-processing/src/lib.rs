//! Showroom Processing Library
//!
//! Image normalization (decode, width-capped resize, JPEG re-encode) and
//! upload validation rules. CPU-bound work runs off the async pool via
//! `spawn_blocking`.

pub mod normalizer;
pub mod validator;

pub use normalizer::{ImageNormalizer, NormalizeError, NormalizedImage};
pub use validator::{UploadRules, ValidationError};
