//! # hemo-core
//!
//! Core crate for the hemodialysis center platform. Contains configuration
//! schemas, typed identifiers, pagination types, collaborator traits,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
