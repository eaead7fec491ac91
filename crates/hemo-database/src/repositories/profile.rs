//! Verification state (user profile) repository.
//!
//! Code consumption and accord are conditional single-statement updates, so
//! a replayed request finds no matching row instead of applying twice.

use sqlx::PgPool;

use hemo_core::error::{AppError, ErrorKind};
use hemo_core::result::AppResult;
use hemo_core::types::UserId;
use hemo_entity::user::VerificationState;

/// Repository for `user_profiles`.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the unverified profile of a new identity.
    pub async fn create(&self, user_id: UserId, code: &str) -> AppResult<VerificationState> {
        sqlx::query_as::<_, VerificationState>(
            "INSERT INTO user_profiles (user_id, verification_code) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create profile", e))
    }

    /// Fetch the profile of an identity.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<VerificationState>> {
        sqlx::query_as::<_, VerificationState>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    /// Store a new code for a still-unverified identity.
    pub async fn replace_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>> {
        sqlx::query_as::<_, VerificationState>(
            "UPDATE user_profiles SET verification_code = $2, updated_at = NOW() \
             WHERE user_id = $1 AND is_verified = FALSE RETURNING *",
        )
        .bind(user_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to replace verification code", e)
        })
    }

    /// Mark the identity verified if `code` matches and it is not yet verified.
    pub async fn consume_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>> {
        sqlx::query_as::<_, VerificationState>(
            "UPDATE user_profiles \
             SET is_verified = TRUE, verification_code = NULL, updated_at = NOW() \
             WHERE user_id = $1 AND verification_code = $2 AND is_verified = FALSE \
             RETURNING *",
        )
        .bind(user_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume verification code", e)
        })
    }

    /// Set `admin_accord` on a verified identity.
    pub async fn grant_accord(&self, user_id: UserId) -> AppResult<Option<VerificationState>> {
        sqlx::query_as::<_, VerificationState>(
            "UPDATE user_profiles SET admin_accord = TRUE, updated_at = NOW() \
             WHERE user_id = $1 AND is_verified = TRUE RETURNING *",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant accord", e))
    }
}
