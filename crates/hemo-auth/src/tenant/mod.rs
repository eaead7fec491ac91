//! Subdomain-based tenant resolution.

pub mod host;
pub mod resolver;

pub use host::{HostClass, classify_host, normalize_host};
pub use resolver::{TenantResolution, TenantResolver};
