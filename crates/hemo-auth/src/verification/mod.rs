//! E-mail verification codes.

pub mod code;

pub use code::{generate_code, is_well_formed};
