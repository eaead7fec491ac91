//! Auth handlers: login, refresh, and e-mail verification.

use axum::Json;
use axum::extract::State;

use hemo_auth::jwt::TokenPair;
use hemo_auth::tenant::TenantResolution;
use hemo_entity::user::VerificationState;
use hemo_service::LoginOutcome;

use crate::dto::request::{LoginRequest, RefreshRequest, ResendCodeRequest, VerifyCodeRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CenterTenant, Tenant, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
///
/// On a center subdomain staff of that center (and superusers) may log in;
/// on the root domain only superusers may.
pub async fn login(
    State(state): State<AppState>,
    Tenant(resolution): Tenant,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginOutcome>>, ApiError> {
    let outcome = match resolution {
        TenantResolution::Center(center) => {
            state
                .login_service
                .login_to_center(&center, &req.username, &req.password)
                .await?
        }
        TenantResolution::Root | TenantResolution::Skipped => {
            state
                .login_service
                .login_to_root(&req.username, &req.password)
                .await?
        }
    };
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let claims = state.jwt_decoder.decode_refresh_token(&req.refresh_token)?;
    let tokens = state.login_service.refresh(claims.sub).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// POST /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    CenterTenant(center): CenterTenant,
    ValidatedJson(req): ValidatedJson<VerifyCodeRequest>,
) -> Result<Json<ApiResponse<VerificationState>>, ApiError> {
    let verified = state
        .verification_service
        .verify(&center, req.user_id, &req.code)
        .await?;
    Ok(Json(ApiResponse::ok(verified)))
}

/// POST /api/auth/resend
pub async fn resend(
    State(state): State<AppState>,
    CenterTenant(center): CenterTenant,
    ValidatedJson(req): ValidatedJson<ResendCodeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .verification_service
        .resend(&center, req.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "A new verification code has been sent",
    ))))
}
