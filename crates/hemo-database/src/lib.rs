//! # hemo-database
//!
//! PostgreSQL connection management and concrete repositories for centers,
//! identities, verification state, and staff.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
