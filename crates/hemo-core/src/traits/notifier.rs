//! Delivery of one-time verification codes.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::result::AppResult;

/// Sends a freshly generated verification code to its owner.
///
/// Mail transport is an external concern; the platform only needs to know
/// whether delivery was accepted.
#[async_trait]
pub trait VerificationNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver `code` to `email` for the account `username`.
    async fn send_verification_code(&self, username: &str, email: &str, code: &str)
    -> AppResult<()>;
}

/// Notifier that records the delivery in the log instead of sending mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl VerificationNotifier for LogNotifier {
    async fn send_verification_code(
        &self,
        username: &str,
        email: &str,
        code: &str,
    ) -> AppResult<()> {
        info!(username = %username, email = %email, "Verification code issued");
        debug!(username = %username, code = %code, "Verification code value");
        Ok(())
    }
}
