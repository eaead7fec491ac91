//! User (identity) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hemo_core::types::UserId;

/// An authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// E-mail address used for verification codes.
    pub email: String,
    /// Argon2id password hash (never serialized to API responses).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Global override: superusers bypass tenant and role checks.
    pub is_superuser: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Whether the account is a superuser.
    pub is_superuser: bool,
}
