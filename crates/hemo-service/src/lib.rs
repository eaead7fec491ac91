//! # hemo-service
//!
//! Use cases built on the tenant resolver and the access decision engine.
//! Services receive their collaborators as `Arc`s at construction time and
//! assume the caller's access was already decided; each one still applies
//! the tenant-equality filter to every read and write it performs.

pub mod center;
pub mod context;
pub mod session;
pub mod staff;
pub mod verification;

pub use center::{CenterService, CreateCenterInput, SubdomainCheck};
pub use context::RequestContext;
pub use session::{LoginOutcome, LoginService, ProfileService, ProfileView};
pub use staff::{NewStaffInput, StaffOnboarding, StaffOverview, StaffService};
pub use verification::VerificationService;
