//! Minimum password requirements.

use hemo_core::config::AuthConfig;
use hemo_core::error::AppError;

/// Rules a new password must satisfy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Build the policy from the auth settings.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Reject passwords that are too short, all digits, or equal to the username.
    pub fn check(&self, username: &str, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Password cannot be entirely numeric"));
        }
        if password.eq_ignore_ascii_case(username) {
            return Err(AppError::validation(
                "Password cannot be the same as the username",
            ));
        }
        Ok(())
    }
}
