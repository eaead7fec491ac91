//! Custom Axum extractors.

pub mod auth;
pub mod tenant;
pub mod validated;

pub use auth::{AuthUser, MaybeAuthUser};
pub use tenant::{CenterTenant, Tenant};
pub use validated::ValidatedJson;
