//! Login and the caller's own profile.

pub mod login;
pub mod profile;

pub use login::{LoginOutcome, LoginService};
pub use profile::{ProfileService, ProfileView};
