//! Center (tenant) entities.

pub mod model;
pub mod slug;

pub use model::{Center, CreateCenter};
pub use slug::{normalize_slug, validate_slug};
