//! # hemo-entity
//!
//! Domain entity models. Every struct in this crate represents a database
//! table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod center;
pub mod staff;
pub mod user;
