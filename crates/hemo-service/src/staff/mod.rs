//! Staff management within one center.

pub mod onboarding;
pub mod service;

pub use onboarding::{NewStaffInput, StaffOnboarding};
pub use service::{StaffOverview, StaffService};
