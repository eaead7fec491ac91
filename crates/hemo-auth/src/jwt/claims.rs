//! Token payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemo_core::types::UserId;

use crate::rbac::Principal;

/// Claims carried by access and refresh tokens.
///
/// Tokens identify the caller only. Tenant, role, and verification state
/// are looked up on every request so that a token never outlives a change
/// to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id.
    pub sub: UserId,
    /// Login name.
    pub username: String,
    /// Superuser flag at issuance.
    pub is_superuser: bool,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expires at (seconds since epoch).
    pub exp: i64,
    /// Token id.
    pub jti: Uuid,
    /// Access or refresh.
    pub token_type: TokenType,
}

/// Kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Presented on API requests.
    Access,
    /// Exchanged for a new access token.
    Refresh,
}

impl Claims {
    /// The caller these claims describe.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            username: self.username.clone(),
            is_superuser: self.is_superuser,
        }
    }
}
