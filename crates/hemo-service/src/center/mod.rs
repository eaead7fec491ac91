//! Center administration.

pub mod service;

pub use service::{CenterService, CreateCenterInput, SubdomainCheck};
