//! The access decision engine.
//!
//! Rules are evaluated in order and the first match decides:
//!
//! 1. no identity: deny
//! 2. superuser: allow
//! 3. no tenant: deny
//! 4. verification state missing or without role privileges: deny
//! 5. no staff assignment: deny
//! 6. assignment in another center: deny
//! 7. local admin: allow
//! 8. read by a read-only role: allow
//! 9. allowed role: allow
//! 10. deny
//!
//! Each decision performs at most one verification lookup and one staff
//! probe. Nothing is cached between requests.

use std::sync::Arc;

use tracing::{error, info, warn};

use hemo_core::result::AppResult;
use hemo_entity::center::Center;
use hemo_entity::staff::Role;

use super::context::{AccessContext, Principal};
use super::decision::{Decision, DenyReason, Grant, GrantBasis};
use super::policies::{AccessMode, OperationPolicy};
use crate::directory::Directory;

/// Inputs of one decision.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// Authenticated caller, if any.
    pub principal: Option<&'a Principal>,
    /// Resolved center, if any.
    pub tenant: Option<&'a Center>,
    /// Operation being attempted.
    pub policy: &'a OperationPolicy,
    /// Read or write.
    pub mode: AccessMode,
}

/// Decides whether a caller may perform an operation against a center.
#[derive(Debug, Clone)]
pub struct AccessDecisionEngine {
    directory: Arc<dyn Directory>,
}

impl AccessDecisionEngine {
    /// Create an engine over `directory`.
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Evaluate `request`. Only storage failures are errors.
    pub async fn decide(&self, request: AccessRequest<'_>) -> AppResult<Decision> {
        let decision = self.evaluate(&request).await?;
        log_decision(&request, &decision);
        Ok(decision)
    }

    async fn evaluate(&self, request: &AccessRequest<'_>) -> AppResult<Decision> {
        let Some(principal) = request.principal else {
            return Ok(Decision::Deny(DenyReason::Unauthenticated));
        };

        if principal.is_superuser {
            return Ok(Decision::Allow(Grant {
                basis: GrantBasis::Superuser,
                context: AccessContext {
                    principal: principal.clone(),
                    center: request.tenant.cloned(),
                    assignment: None,
                    verification: None,
                },
            }));
        }

        let Some(tenant) = request.tenant else {
            return Ok(Decision::Deny(DenyReason::NoTenant));
        };

        let Some(verification) = self.directory.find_verification(principal.user_id).await? else {
            return Ok(Decision::Deny(DenyReason::MissingVerificationState));
        };
        if !verification.has_role_privileges() {
            return Ok(Decision::Deny(DenyReason::RolePrivilegesWithheld));
        }

        let Some(assignment) = self
            .directory
            .find_staff_assignment(principal.user_id)
            .await?
        else {
            return Ok(Decision::Deny(DenyReason::NoStaffAssignment));
        };

        if assignment.center_id != tenant.id {
            return Ok(Decision::Deny(DenyReason::CrossTenant));
        }

        let basis = if assignment.role == Role::LocalAdmin {
            GrantBasis::LocalAdmin
        } else if request.mode == AccessMode::Read
            && request.policy.allows_read_only(assignment.role)
        {
            GrantBasis::ReadOnlyRole
        } else if request.policy.allows(assignment.role) {
            GrantBasis::AllowedRole
        } else {
            return Ok(Decision::Deny(DenyReason::RoleNotPermitted));
        };

        Ok(Decision::Allow(Grant {
            basis,
            context: AccessContext {
                principal: principal.clone(),
                center: Some(tenant.clone()),
                assignment: Some(assignment),
                verification: Some(verification),
            },
        }))
    }
}

fn log_decision(request: &AccessRequest<'_>, decision: &Decision) {
    let user_id = request.principal.map(|p| p.user_id.to_string());
    let tenant = request.tenant.map(|c| c.sub_domain.as_str());
    let operation = request.policy.name;

    match decision {
        Decision::Allow(grant) => info!(
            user_id = ?user_id,
            tenant = ?tenant,
            operation = %operation,
            mode = ?request.mode,
            basis = ?grant.basis,
            rule = grant.basis.rule(),
            "Access granted"
        ),
        Decision::Deny(reason) if reason.is_security_event() => error!(
            user_id = ?user_id,
            tenant = ?tenant,
            operation = %operation,
            mode = ?request.mode,
            reason = reason.code(),
            rule = reason.rule(),
            "Cross-tenant access attempt denied"
        ),
        Decision::Deny(reason) => warn!(
            user_id = ?user_id,
            tenant = ?tenant,
            operation = %operation,
            mode = ?request.mode,
            reason = reason.code(),
            rule = reason.rule(),
            "Access denied"
        ),
    }
}
