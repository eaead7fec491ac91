//! Username/password login against a center or the platform root.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use hemo_auth::directory::{AccountStore, Directory};
use hemo_auth::jwt::{JwtEncoder, TokenPair};
use hemo_auth::password::PasswordHasher;
use hemo_core::error::AppError;
use hemo_core::types::UserId;
use hemo_entity::center::Center;
use hemo_entity::staff::{Role, StaffCategory};
use hemo_entity::user::User;

/// Path the client follows to submit a verification code.
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";

/// Successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Issued tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// Identity id.
    pub user_id: UserId,
    /// Login name.
    pub username: String,
    /// Superuser flag.
    pub is_superuser: bool,
    /// Role in the center; absent for superusers.
    pub role: Option<Role>,
    /// Staff category; absent for superusers.
    pub category: Option<StaffCategory>,
    /// Label of the center logged into; absent on root.
    pub center: Option<String>,
    /// Whether the e-mail was verified.
    pub is_verified: bool,
    /// Whether role privileges are active.
    pub has_role_privileges: bool,
}

/// Authenticates identities and issues tokens.
#[derive(Debug, Clone)]
pub struct LoginService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
}

impl LoginService {
    /// Create a new login service.
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher, encoder: JwtEncoder) -> Self {
        Self {
            store,
            hasher,
            encoder,
        }
    }

    /// Log in to `center`.
    ///
    /// Superusers may log in to any center. Staff must belong to this
    /// center and must have verified their e-mail; an unverified member is
    /// refused with a pointer to the verification step.
    pub async fn login_to_center(
        &self,
        center: &Center,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, AppError> {
        let user = self.authenticate(username, password).await?;

        if user.is_superuser {
            info!(user_id = %user.id, center = %center.sub_domain, "Superuser logged in to center");
            return self.superuser_outcome(user, Some(center.label.clone()));
        }

        let assignment = match self.store.find_staff_assignment(user.id).await? {
            Some(a) if a.center_id == center.id => a,
            _ => {
                warn!(
                    user_id = %user.id,
                    center = %center.sub_domain,
                    "Login refused: not staff of this center"
                );
                return Err(AppError::authorization(
                    "You are not authorized for this center",
                ));
            }
        };

        let state = self
            .store
            .find_verification(user.id)
            .await?
            .ok_or_else(|| {
                AppError::authorization("Verification profile missing. Contact support.")
            })?;

        if !state.is_verified {
            info!(user_id = %user.id, center = %center.sub_domain, "Login pending e-mail verification");
            return Err(
                AppError::authorization("Email verification required").with_details(
                    serde_json::json!({
                        "redirect_to": VERIFY_EMAIL_PATH,
                        "user_id": user.id,
                    }),
                ),
            );
        }

        let tokens = self.encoder.issue(&user)?;
        info!(
            user_id = %user.id,
            center = %center.sub_domain,
            role = %assignment.role,
            "Staff logged in"
        );
        Ok(LoginOutcome {
            tokens,
            user_id: user.id,
            username: user.username,
            is_superuser: false,
            role: Some(assignment.role),
            category: Some(assignment.category),
            center: Some(center.label.clone()),
            is_verified: state.is_verified,
            has_role_privileges: state.has_role_privileges(),
        })
    }

    /// Log in on the root domain. Superusers only.
    pub async fn login_to_root(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, AppError> {
        let user = self.authenticate(username, password).await?;
        if !user.is_superuser {
            warn!(user_id = %user.id, "Root login refused for non-superuser");
            return Err(AppError::authorization(
                "Log in through your center's subdomain",
            ));
        }
        info!(user_id = %user.id, "Superuser logged in to root");
        self.superuser_outcome(user, None)
    }

    /// Issue a fresh token pair for a still-existing identity.
    pub async fn refresh(&self, user_id: UserId) -> Result<TokenPair, AppError> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;
        let tokens = self.encoder.issue(&user)?;
        info!(user_id = %user.id, "Tokens refreshed");
        Ok(tokens)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::authentication("Invalid username or password");

        let Some(user) = self.store.find_user_by_username(username.trim()).await? else {
            warn!(username = %username, "Login failed: unknown username");
            return Err(invalid());
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }
        Ok(user)
    }

    fn superuser_outcome(
        &self,
        user: User,
        center: Option<String>,
    ) -> Result<LoginOutcome, AppError> {
        let tokens = self.encoder.issue(&user)?;
        Ok(LoginOutcome {
            tokens,
            user_id: user.id,
            username: user.username,
            is_superuser: true,
            role: None,
            category: None,
            center,
            is_verified: true,
            has_role_privileges: true,
        })
    }
}
