//! Per-request inputs and outputs of an access decision.

use serde::{Deserialize, Serialize};

use hemo_core::types::UserId;
use hemo_entity::center::Center;
use hemo_entity::staff::StaffAssignment;
use hemo_entity::user::VerificationState;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity id.
    pub user_id: UserId,
    /// Login name.
    pub username: String,
    /// Global override.
    pub is_superuser: bool,
}

/// Everything the engine learned while granting access.
///
/// Built per decision and dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    /// Caller.
    pub principal: Principal,
    /// Resolved center. `None` only for superusers on root traffic.
    pub center: Option<Center>,
    /// Caller's assignment. `None` for superusers.
    pub assignment: Option<StaffAssignment>,
    /// Caller's verification state. `None` for superusers.
    pub verification: Option<VerificationState>,
}
