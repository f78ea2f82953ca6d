//! Multipart image upload pipeline.
//!
//! Two stages: [`ingest`] parses and validates the multipart body into
//! memory (all-or-nothing), [`pipeline`] normalizes every file and stores
//! the batch with compensating cleanup on failure. Handlers compose the two
//! and then associate the returned URLs with their entity.

pub mod ingest;
pub mod pipeline;

pub use ingest::collect_multipart;
pub use pipeline::{best_effort_delete, process_and_store, store_single_image};
