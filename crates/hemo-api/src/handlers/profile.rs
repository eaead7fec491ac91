//! GET /api/me

use axum::Json;
use axum::extract::State;

use hemo_service::{ProfileView, RequestContext};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, Tenant};
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    tenant: Tenant,
) -> Result<Json<ApiResponse<ProfileView>>, ApiError> {
    let ctx = RequestContext::authenticated(principal, tenant.center().cloned());
    let profile = state.profile_service.me(&ctx).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
