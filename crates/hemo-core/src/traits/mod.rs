//! Collaborator traits defined in `hemo-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{LogNotifier, VerificationNotifier};
