//! Allow/deny outcomes.

use serde::Serialize;
use thiserror::Error;

use hemo_core::error::AppError;

use super::context::AccessContext;

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantBasis {
    /// Superuser override.
    Superuser,
    /// Local admin of the resolved center.
    LocalAdmin,
    /// Read-only role on a read.
    ReadOnlyRole,
    /// Role in the operation's allowed set.
    AllowedRole,
}

impl GrantBasis {
    /// Decision rule that produced this grant.
    pub fn rule(&self) -> u8 {
        match self {
            Self::Superuser => 2,
            Self::LocalAdmin => 7,
            Self::ReadOnlyRole => 8,
            Self::AllowedRole => 9,
        }
    }
}

/// Why access was denied. Ordinary denials are values, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No identity was presented.
    #[error("authentication required")]
    Unauthenticated,
    /// The request did not resolve to a center.
    #[error("no tenant resolved for this request")]
    NoTenant,
    /// The identity has no verification state.
    #[error("identity has no verification state")]
    MissingVerificationState,
    /// The identity is not both verified and approved.
    #[error("role privileges not yet granted")]
    RolePrivilegesWithheld,
    /// The identity is not staff anywhere.
    #[error("identity holds no staff assignment")]
    NoStaffAssignment,
    /// The identity is staff of a different center.
    #[error("staff assignment belongs to another center")]
    CrossTenant,
    /// The role is not allowed for this operation and mode.
    #[error("role not permitted for this operation")]
    RoleNotPermitted,
}

impl DenyReason {
    /// Structured reason code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::NoTenant => "no_tenant",
            Self::MissingVerificationState => "missing_verification_state",
            Self::RolePrivilegesWithheld => "role_privileges_withheld",
            Self::NoStaffAssignment => "no_staff_assignment",
            Self::CrossTenant => "cross_tenant",
            Self::RoleNotPermitted => "role_not_permitted",
        }
    }

    /// Decision rule that produced this denial.
    pub fn rule(&self) -> u8 {
        match self {
            Self::Unauthenticated => 1,
            Self::NoTenant => 3,
            Self::MissingVerificationState | Self::RolePrivilegesWithheld => 4,
            Self::NoStaffAssignment => 5,
            Self::CrossTenant => 6,
            Self::RoleNotPermitted => 10,
        }
    }

    /// Denials that indicate an attempt to cross a tenant boundary.
    pub fn is_security_event(&self) -> bool {
        matches!(self, Self::CrossTenant)
    }
}

impl From<DenyReason> for AppError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::Unauthenticated => {
                AppError::authentication("Authentication credentials were not provided")
            }
            _ => AppError::authorization("You do not have permission to perform this action"),
        }
    }
}

/// A successful decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    /// Rule that allowed the request.
    pub basis: GrantBasis,
    /// What the engine resolved on the way.
    pub context: AccessContext,
}

/// Result of evaluating one request against one policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed.
    Allow(Grant),
    /// Stop.
    Deny(DenyReason),
}

impl Decision {
    /// Whether the decision allows the request.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// The denial reason, if denied.
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow(_) => None,
            Self::Deny(reason) => Some(*reason),
        }
    }

    /// Convert into a result, mapping denials to 401/403 errors.
    pub fn into_result(self) -> Result<Grant, AppError> {
        match self {
            Self::Allow(grant) => Ok(grant),
            Self::Deny(reason) => Err(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemo_core::error::ErrorKind;

    #[test]
    fn test_denials_map_to_uniform_errors() {
        let unauthenticated: AppError = DenyReason::Unauthenticated.into();
        assert_eq!(unauthenticated.kind, ErrorKind::Authentication);

        let cross: AppError = DenyReason::CrossTenant.into();
        let role: AppError = DenyReason::RoleNotPermitted.into();
        assert_eq!(cross.kind, ErrorKind::Authorization);
        assert_eq!(cross.message, role.message);
    }

    #[test]
    fn test_codes() {
        assert_eq!(DenyReason::RolePrivilegesWithheld.code(), "role_privileges_withheld");
        assert!(DenyReason::CrossTenant.is_security_event());
        assert!(!DenyReason::NoTenant.is_security_event());
    }
}
