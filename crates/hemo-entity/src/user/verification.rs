//! Per-identity verification and accord state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hemo_core::types::UserId;

/// One-to-one companion of a [`User`](super::User) that gates role
/// privileges.
///
/// `admin_accord` only ever becomes `true` after `is_verified`; the storage
/// layer enforces this with a conditional update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VerificationState {
    /// Owning identity.
    pub user_id: UserId,
    /// Pending six-digit code, cleared once consumed.
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,
    /// Whether the identity has confirmed its e-mail.
    pub is_verified: bool,
    /// Whether a local admin has approved the identity.
    pub admin_accord: bool,
    /// Last state change.
    pub updated_at: DateTime<Utc>,
}

impl VerificationState {
    /// Role privileges require both verification and accord.
    pub fn has_role_privileges(&self) -> bool {
        self.is_verified && self.admin_accord
    }

    /// Position of this identity in the eligibility lifecycle.
    pub fn eligibility(&self) -> Eligibility {
        match (self.is_verified, self.admin_accord) {
            (true, true) => Eligibility::FullyAuthorized,
            (true, false) => Eligibility::VerifiedPendingAccord,
            (false, _) => Eligibility::Unverified,
        }
    }
}

/// Eligibility lifecycle of a staff identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Eligibility {
    /// Code not yet confirmed.
    Unverified,
    /// Code confirmed; waiting for a local admin.
    VerifiedPendingAccord,
    /// Role privileges active.
    FullyAuthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(is_verified: bool, admin_accord: bool) -> VerificationState {
        VerificationState {
            user_id: UserId::new(),
            verification_code: None,
            is_verified,
            admin_accord,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_privileges_require_both_flags() {
        assert!(!state(false, false).has_role_privileges());
        assert!(!state(true, false).has_role_privileges());
        assert!(!state(false, true).has_role_privileges());
        assert!(state(true, true).has_role_privileges());
    }

    #[test]
    fn test_eligibility() {
        assert_eq!(state(false, false).eligibility(), Eligibility::Unverified);
        assert_eq!(state(false, true).eligibility(), Eligibility::Unverified);
        assert_eq!(
            state(true, false).eligibility(),
            Eligibility::VerifiedPendingAccord
        );
        assert_eq!(state(true, true).eligibility(), Eligibility::FullyAuthorized);
    }
}
