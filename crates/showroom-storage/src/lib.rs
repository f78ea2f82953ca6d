//! Showroom Storage Library
//!
//! Storage abstraction over "put bytes, get a durable URL". Two backends:
//! local filesystem (URLs under a configured `/uploads` prefix) and S3-style
//! object storage (absolute URLs). The rest of the pipeline is
//! storage-agnostic — it only ever handles the returned URL string.
//!
//! # Key format
//!
//! Objects are stored under `{folder}/{uuid}.{ext}`; the folder names the
//! owning entity kind (`cars`, `news`, `offers`, `partners`, `home`). Keys
//! must not contain `..` or a leading `/`.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use showroom_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
