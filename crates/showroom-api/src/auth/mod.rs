//! Admin authentication: HS256 JWTs plus the bearer-token middleware.

pub mod jwt;
pub mod middleware;

pub use jwt::issue_token;
pub use middleware::{auth_middleware, CurrentAdmin};
