//! Listing, deleting, and approving staff of the resolved center.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use hemo_auth::directory::{AccountStore, Directory};
use hemo_core::error::AppError;
use hemo_core::types::{StaffId, UserId};
use hemo_entity::staff::{StaffCategory, StaffMember, StaffRecord};
use hemo_entity::user::VerificationState;

use super::onboarding::{NewStaffInput, StaffOnboarding};
use crate::context::RequestContext;

/// A staff row with the account state of its identity.
#[derive(Debug, Clone, Serialize)]
pub struct StaffOverview {
    /// The category row.
    pub staff: StaffRecord,
    /// Login name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Whether the e-mail was verified.
    pub is_verified: bool,
    /// Whether a local admin approved the identity.
    pub admin_accord: bool,
}

/// Staff management scoped to the caller's center.
#[derive(Debug, Clone)]
pub struct StaffService {
    store: Arc<dyn AccountStore>,
    onboarding: StaffOnboarding,
}

impl StaffService {
    /// Create a new staff service.
    pub fn new(store: Arc<dyn AccountStore>, onboarding: StaffOnboarding) -> Self {
        Self { store, onboarding }
    }

    /// Create a staff member in the caller's center.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        category: StaffCategory,
        input: NewStaffInput,
    ) -> Result<StaffOverview, AppError> {
        let center = ctx.require_center()?;
        let (user, staff) = self.onboarding.onboard(center, category, input).await?;
        Ok(StaffOverview {
            staff,
            username: user.username,
            email: user.email,
            is_verified: false,
            admin_accord: false,
        })
    }

    /// Staff of one category in the caller's center.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        category: StaffCategory,
    ) -> Result<Vec<StaffOverview>, AppError> {
        let center = ctx.require_center()?;
        let rows = self.store.list_staff(category, center.id).await?;

        let mut overviews = Vec::with_capacity(rows.len());
        for staff in rows {
            let user_id = staff.user_id();
            let Some(user) = self.store.find_user_by_id(user_id).await? else {
                warn!(user_id = %user_id, "Staff row without identity skipped");
                continue;
            };
            let state = self.store.find_verification(user_id).await?;
            overviews.push(StaffOverview {
                staff,
                username: user.username,
                email: user.email,
                is_verified: state.as_ref().is_some_and(|s| s.is_verified),
                admin_accord: state.as_ref().is_some_and(|s| s.admin_accord),
            });
        }
        Ok(overviews)
    }

    /// Delete a staff member of the caller's center along with its identity.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        category: StaffCategory,
        staff_id: StaffId,
    ) -> Result<(), AppError> {
        let center = ctx.require_center()?;
        let staff = self
            .store
            .find_staff(category, staff_id, center.id)
            .await?
            .ok_or_else(|| AppError::not_found("Staff member not found"))?;

        self.store.delete_user(staff.user_id()).await?;

        info!(
            staff_id = %staff_id,
            user_id = %staff.user_id(),
            center_id = %center.id,
            category = %category,
            deleted_by = %ctx.user_id(),
            "Staff member deleted"
        );
        Ok(())
    }

    /// Approve a verified staff member of the caller's center.
    ///
    /// Accord cannot be withdrawn once granted.
    pub async fn grant_accord(
        &self,
        ctx: &RequestContext,
        target: UserId,
    ) -> Result<VerificationState, AppError> {
        let center = ctx.require_center()?;
        let assignment = self
            .store
            .find_staff_assignment(target)
            .await?
            .filter(|a| a.center_id == center.id)
            .ok_or_else(|| AppError::not_found("Staff member not found in this center"))?;

        if let Some(state) = self.store.grant_admin_accord(target).await? {
            info!(
                user_id = %target,
                center_id = %center.id,
                category = %assignment.category,
                granted_by = %ctx.user_id(),
                "Admin accord granted"
            );
            return Ok(state);
        }

        match self.store.find_verification(target).await? {
            None => Err(AppError::not_found("Verification profile missing")),
            Some(_) => Err(AppError::validation(
                "The user must verify their e-mail before accord can be granted",
            )),
        }
    }
}
