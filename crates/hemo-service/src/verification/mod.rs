//! E-mail verification of staff identities.

pub mod service;

pub use service::VerificationService;
