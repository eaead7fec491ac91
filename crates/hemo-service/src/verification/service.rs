//! Code submission and re-issue.

use std::sync::Arc;

use tracing::{info, warn};

use hemo_auth::directory::{AccountStore, Directory};
use hemo_auth::verification::{generate_code, is_well_formed};
use hemo_core::error::AppError;
use hemo_core::traits::VerificationNotifier;
use hemo_core::types::UserId;
use hemo_entity::center::Center;
use hemo_entity::user::VerificationState;

/// Moves identities from unverified to verified.
#[derive(Debug, Clone)]
pub struct VerificationService {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn VerificationNotifier>,
    code_length: usize,
}

impl VerificationService {
    /// Create a new verification service.
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn VerificationNotifier>,
        code_length: usize,
    ) -> Self {
        Self {
            store,
            notifier,
            code_length,
        }
    }

    /// Submit a code for a staff member of `center`.
    ///
    /// Succeeds at most once per issued code.
    pub async fn verify(
        &self,
        center: &Center,
        user_id: UserId,
        code: &str,
    ) -> Result<VerificationState, AppError> {
        let code = code.trim();
        if !is_well_formed(code, self.code_length) {
            return Err(AppError::validation(format!(
                "Verification code must be {} digits",
                self.code_length
            )));
        }
        self.require_member(center, user_id).await?;

        match self.store.consume_verification_code(user_id, code).await? {
            Some(state) => {
                info!(user_id = %user_id, center_id = %center.id, "E-mail verified");
                Ok(state)
            }
            None => {
                warn!(user_id = %user_id, center_id = %center.id, "Rejected verification code");
                Err(AppError::validation("Invalid verification code"))
            }
        }
    }

    /// Issue and deliver a fresh code to an unverified staff member of `center`.
    pub async fn resend(&self, center: &Center, user_id: UserId) -> Result<(), AppError> {
        self.require_member(center, user_id).await?;
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let code = generate_code(self.code_length);
        if self
            .store
            .replace_verification_code(user_id, &code)
            .await?
            .is_none()
        {
            return Err(AppError::conflict("This account is already verified"));
        }

        self.notifier
            .send_verification_code(&user.username, &user.email, &code)
            .await?;
        info!(user_id = %user_id, center_id = %center.id, "Verification code re-issued");
        Ok(())
    }

    async fn require_member(&self, center: &Center, user_id: UserId) -> Result<(), AppError> {
        match self.store.find_staff_assignment(user_id).await? {
            Some(a) if a.center_id == center.id => Ok(()),
            _ => Err(AppError::not_found("User not found")),
        }
    }
}
