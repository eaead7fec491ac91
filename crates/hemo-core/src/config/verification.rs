//! Account verification configuration.

use serde::{Deserialize, Serialize};

/// One-time verification code settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Number of digits in a generated code.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
        }
    }
}

fn default_code_length() -> usize {
    6
}
