//! Request-level services.

pub mod upload;
