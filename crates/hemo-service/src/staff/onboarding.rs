//! Creating a staff member: identity, verification state, and category row.
//!
//! The three writes are not covered by one transaction. When anything after
//! the identity insert fails, the identity is deleted again so no account
//! exists without its staff row. If that deletion also fails the identity is
//! reported as orphaned and the caller gets an internal error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use hemo_auth::directory::AccountStore;
use hemo_auth::password::{PasswordHasher, PasswordPolicy};
use hemo_auth::verification::generate_code;
use hemo_core::error::AppError;
use hemo_core::traits::VerificationNotifier;
use hemo_entity::center::Center;
use hemo_entity::staff::{CategoryDetails, NewStaff, Role, StaffCategory, StaffRecord};
use hemo_entity::user::{CreateUser, User};

/// Fields supplied when creating a staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStaffInput {
    /// Login name of the new identity.
    pub username: String,
    /// E-mail that receives the verification code.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// National identity card number.
    pub national_id: String,
    /// Role; the category default when absent.
    pub role: Option<Role>,
    /// Job title, council number, or qualification depending on category.
    pub detail: String,
}

/// Creates identities together with their staff rows.
#[derive(Debug, Clone)]
pub struct StaffOnboarding {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    notifier: Arc<dyn VerificationNotifier>,
    code_length: usize,
}

impl StaffOnboarding {
    /// Create a new onboarding flow.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        policy: PasswordPolicy,
        notifier: Arc<dyn VerificationNotifier>,
        code_length: usize,
    ) -> Self {
        Self {
            store,
            hasher,
            policy,
            notifier,
            code_length,
        }
    }

    /// Create a staff member of `category` in `center`.
    pub async fn onboard(
        &self,
        center: &Center,
        category: StaffCategory,
        input: NewStaffInput,
    ) -> Result<(User, StaffRecord), AppError> {
        self.policy.check(&input.username, &input.password)?;
        let password_hash = self.hasher.hash(&input.password)?;

        let user = self
            .store
            .create_user(&CreateUser {
                username: input.username.trim().to_string(),
                email: input.email.trim().to_string(),
                password_hash,
                is_superuser: false,
            })
            .await?;

        let code = generate_code(self.code_length);
        let new_staff = NewStaff {
            user_id: user.id,
            center_id: center.id,
            last_name: input.last_name.trim().to_string(),
            first_name: input.first_name.trim().to_string(),
            national_id: input.national_id.trim().to_string(),
            role: input.role.unwrap_or_else(|| category.default_role()),
            details: CategoryDetails::for_category(category, input.detail.trim().to_string()),
        };

        let record = match self.attach(&user, &code, &new_staff).await {
            Ok(record) => record,
            Err(cause) => return Err(self.compensate(&user, cause).await),
        };

        info!(
            user_id = %user.id,
            center_id = %center.id,
            category = %category,
            role = %new_staff.role,
            "Staff member created"
        );

        if let Err(e) = self
            .notifier
            .send_verification_code(&user.username, &user.email, &code)
            .await
        {
            warn!(
                user_id = %user.id,
                error = %e,
                "Verification code delivery failed; the code can be resent"
            );
        }

        Ok((user, record))
    }

    async fn attach(
        &self,
        user: &User,
        code: &str,
        new_staff: &NewStaff,
    ) -> Result<StaffRecord, AppError> {
        self.store.create_verification(user.id, code).await?;
        self.store.create_staff(new_staff).await
    }

    async fn compensate(&self, user: &User, cause: AppError) -> AppError {
        match self.store.delete_user(user.id).await {
            Ok(_) => {
                warn!(
                    user_id = %user.id,
                    username = %user.username,
                    error = %cause,
                    "Staff creation failed; identity removed"
                );
                cause
            }
            Err(rollback) => {
                error!(
                    user_id = %user.id,
                    username = %user.username,
                    error = %cause,
                    rollback_error = %rollback,
                    "Orphaned identity: staff creation failed and the identity could not be removed"
                );
                AppError::internal("Staff creation failed and could not be rolled back")
                    .with_details(serde_json::json!({ "orphaned_user_id": user.id }))
            }
        }
    }
}
