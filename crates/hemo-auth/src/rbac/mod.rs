//! Role-based access control over tenant-scoped operations.

pub mod context;
pub mod decision;
pub mod engine;
pub mod policies;

pub use context::{AccessContext, Principal};
pub use decision::{Decision, DenyReason, Grant, GrantBasis};
pub use engine::{AccessDecisionEngine, AccessRequest};
pub use policies::{AccessMode, OperationPolicy, catalog};
