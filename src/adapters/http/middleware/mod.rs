//! HTTP middleware and extractors.

mod auth;

pub use auth::{AuthRejection, AuthenticatedUser, ServiceAuth, ServicePrincipal};
