//! Identity and verification entities.

pub mod model;
pub mod verification;

pub use model::{CreateUser, User};
pub use verification::{Eligibility, VerificationState};
