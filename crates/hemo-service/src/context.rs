//! Who is acting, and against which center.

use chrono::{DateTime, Utc};

use hemo_auth::rbac::{Grant, Principal};
use hemo_core::error::AppError;
use hemo_core::types::UserId;
use hemo_entity::center::Center;
use hemo_entity::staff::StaffAssignment;

/// Context of the current request, handed to every service call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The caller.
    pub principal: Principal,
    /// Resolved center, if any.
    pub center: Option<Center>,
    /// The caller's staff assignment, when the engine resolved one.
    pub assignment: Option<StaffAssignment>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context of a request the engine allowed.
    pub fn from_grant(grant: Grant) -> Self {
        Self {
            principal: grant.context.principal,
            center: grant.context.center,
            assignment: grant.context.assignment,
            request_time: Utc::now(),
        }
    }

    /// Context of an authenticated request that needs no role decision.
    pub fn authenticated(principal: Principal, center: Option<Center>) -> Self {
        Self {
            principal,
            center,
            assignment: None,
            request_time: Utc::now(),
        }
    }

    /// Caller id.
    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }

    /// Whether the caller is a superuser.
    pub fn is_superuser(&self) -> bool {
        self.principal.is_superuser
    }

    /// The resolved center, or a bad-request error on root traffic.
    pub fn require_center(&self) -> Result<&Center, AppError> {
        self.center
            .as_ref()
            .ok_or_else(|| AppError::bad_request("This operation must target a center subdomain"))
    }

    /// Fail unless the caller is a superuser.
    pub fn require_superuser(&self) -> Result<(), AppError> {
        if self.is_superuser() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You do not have permission to perform this action",
            ))
        }
    }
}
