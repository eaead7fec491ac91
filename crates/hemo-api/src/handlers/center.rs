//! Center management handlers (superuser) and the public subdomain check.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use hemo_core::types::PageResponse;
use hemo_entity::center::Center;
use hemo_service::{RequestContext, SubdomainCheck};

use crate::dto::request::{CenterListQuery, CreateCenterRequest, SubdomainQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/centers
pub async fn create_center(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCenterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Center>>), ApiError> {
    let ctx = RequestContext::authenticated(principal, None);
    let center = state.center_service.create(&ctx, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(center))))
}

/// GET /api/centers
pub async fn list_centers(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Query(query): Query<CenterListQuery>,
) -> Result<Json<ApiResponse<PageResponse<Center>>>, ApiError> {
    let ctx = RequestContext::authenticated(principal, None);
    let page = state
        .center_service
        .list(&ctx, query.label.as_deref(), &query.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/centers/check
pub async fn check_subdomain(
    State(state): State<AppState>,
    Query(query): Query<SubdomainQuery>,
) -> Result<Json<ApiResponse<SubdomainCheck>>, ApiError> {
    let check = state
        .center_service
        .check_subdomain(&query.sub_domain)
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}
