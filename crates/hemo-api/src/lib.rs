//! # hemo-api
//!
//! HTTP API layer for the hemodialysis center platform built on Axum.
//!
//! Every request first passes the tenant middleware, which resolves the
//! `Host` header to a center and stores the result as a request extension.
//! Tenant-scoped handlers then run the access decision engine through
//! [`guard::authorize`] before touching any data.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
