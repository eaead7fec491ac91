//! Bearer-token extractors.
//!
//! Tokens carry only the caller's identity. Whatever the caller may do in
//! the resolved center is decided per request by the access engine.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use hemo_auth::rbac::Principal;
use hemo_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller; rejects the request without a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Caller if a token was presented.
///
/// An absent header yields `None` so the access engine can deny with
/// `Unauthenticated`; a present but invalid token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token.trim())?;
        Ok(Self(Some(claims.principal())))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(principal) = MaybeAuthUser::from_request_parts(parts, state).await?;
        principal
            .map(Self)
            .ok_or_else(|| AppError::authentication("Missing Authorization header").into())
    }
}
