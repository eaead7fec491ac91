//! HTTP handlers grouped by domain.

pub mod auth;
pub mod center;
pub mod health;
pub mod policy;
pub mod profile;
pub mod staff;
