//! HS256 token signing.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemo_core::config::AuthConfig;
use hemo_core::error::AppError;
use hemo_entity::user::User;

use super::claims::{Claims, TokenType};

/// Signs access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived token for API calls.
    pub access_token: String,
    /// Long-lived token for renewal.
    pub refresh_token: String,
    /// When the access token expires.
    pub access_expires_at: DateTime<Utc>,
    /// When the refresh token expires.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Build an encoder from the auth settings.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.jwt_refresh_ttl_hours as i64),
        }
    }

    /// Issue a token pair for `user`.
    pub fn issue(&self, user: &User) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        Ok(TokenPair {
            access_token: self.sign(user, now, access_expires_at, TokenType::Access)?,
            refresh_token: self.sign(user, now, refresh_expires_at, TokenType::Refresh)?,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        token_type: TokenType,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            is_superuser: user.is_superuser,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }
}
