//! The caller's own view of their account.

use std::sync::Arc;

use serde::Serialize;

use hemo_auth::directory::{AccountStore, Directory};
use hemo_core::error::AppError;
use hemo_core::types::{CenterId, UserId};
use hemo_entity::staff::{Role, StaffCategory};
use hemo_entity::user::Eligibility;

use crate::context::RequestContext;

/// Center the caller works for.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCenter {
    /// Center id.
    pub id: CenterId,
    /// Subdomain.
    pub sub_domain: String,
    /// Label.
    pub label: String,
}

/// Response of `GET /me`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    /// Identity id.
    pub user_id: UserId,
    /// Login name.
    pub username: String,
    /// E-mail.
    pub email: String,
    /// Superuser flag.
    pub is_superuser: bool,
    /// Center of the caller's assignment.
    pub center: Option<ProfileCenter>,
    /// Role held there.
    pub role: Option<Role>,
    /// Staff category.
    pub category: Option<StaffCategory>,
    /// Eligibility lifecycle state.
    pub eligibility: Option<Eligibility>,
}

/// Reads the caller's profile.
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<dyn AccountStore>,
}

impl ProfileService {
    /// Create a new profile service.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Profile of the authenticated caller.
    pub async fn me(&self, ctx: &RequestContext) -> Result<ProfileView, AppError> {
        let user = self
            .store
            .find_user_by_id(ctx.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        let assignment = self.store.find_staff_assignment(user.id).await?;
        let center = match assignment {
            Some(a) => self
                .store
                .find_center_by_id(a.center_id)
                .await?
                .map(|c| ProfileCenter {
                    id: c.id,
                    sub_domain: c.sub_domain,
                    label: c.label,
                }),
            None => None,
        };
        let eligibility = self
            .store
            .find_verification(user.id)
            .await?
            .map(|s| s.eligibility());

        Ok(ProfileView {
            user_id: user.id,
            username: user.username,
            email: user.email,
            is_superuser: user.is_superuser,
            center,
            role: assignment.map(|a| a.role),
            category: assignment.map(|a| a.category),
            eligibility,
        })
    }
}
