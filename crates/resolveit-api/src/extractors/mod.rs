//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies and multipart submissions.

mod auth;
mod multipart;
mod validated;

pub use auth::{AdminUser, AuthUser, OptionalAuthUser};
pub use multipart::ComplaintForm;
pub use validated::{JsonBody, ValidatedJson};
