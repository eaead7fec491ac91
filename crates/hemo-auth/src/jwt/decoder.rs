//! HS256 token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use hemo_core::config::AuthConfig;
use hemo_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates signed tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Build a decoder from the auth settings.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validate an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_as(token, TokenType::Access)
    }

    /// Validate a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_as(token, TokenType::Refresh)
    }

    fn decode_as(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::authentication("Token has expired"),
                JwtErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication("Invalid token"),
            })?;

        if claims.token_type != expected {
            return Err(AppError::authentication("Wrong token type"));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use chrono::Utc;
    use hemo_core::error::ErrorKind;
    use hemo_core::types::UserId;
    use hemo_entity::user::User;

    fn user() -> User {
        User {
            id: UserId::new(),
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: String::new(),
            is_superuser: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let config = AuthConfig::default();
        let user = user();
        let pair = JwtEncoder::new(&config).issue(&user).unwrap();
        let decoder = JwtDecoder::new(&config);

        let claims = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert!(claims.principal().is_superuser);

        let err = decoder.decode_access_token(&pair.refresh_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let pair = JwtEncoder::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            ..AuthConfig::default()
        })
        .issue(&user())
        .unwrap();

        let err = JwtDecoder::new(&AuthConfig::default())
            .decode_access_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
