//! Staff management handlers, guarded by the `staff_management` policy.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};

use hemo_auth::rbac::catalog;
use hemo_core::types::StaffId;
use hemo_entity::staff::StaffCategory;
use hemo_entity::user::VerificationState;
use hemo_service::StaffOverview;

use crate::dto::request::{CreateStaffRequest, GrantAccordRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{MaybeAuthUser, Tenant, ValidatedJson};
use crate::guard::authorize;
use crate::state::AppState;

/// GET /api/staff/{category}
pub async fn list_staff(
    State(state): State<AppState>,
    method: Method,
    caller: MaybeAuthUser,
    tenant: Tenant,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<StaffOverview>>>, ApiError> {
    let ctx = authorize(&state, &caller, &tenant, &catalog::STAFF_MANAGEMENT, &method).await?;
    let category: StaffCategory = category.parse()?;
    let staff = state.staff_service.list(&ctx, category).await?;
    Ok(Json(ApiResponse::ok(staff)))
}

/// POST /api/staff/{category}
pub async fn create_staff(
    State(state): State<AppState>,
    method: Method,
    caller: MaybeAuthUser,
    tenant: Tenant,
    Path(category): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateStaffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffOverview>>), ApiError> {
    let ctx = authorize(&state, &caller, &tenant, &catalog::STAFF_MANAGEMENT, &method).await?;
    let category: StaffCategory = category.parse()?;
    let created = state
        .staff_service
        .create(&ctx, category, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// DELETE /api/staff/{category}/{id}
pub async fn delete_staff(
    State(state): State<AppState>,
    method: Method,
    caller: MaybeAuthUser,
    tenant: Tenant,
    Path((category, staff_id)): Path<(String, StaffId)>,
) -> Result<StatusCode, ApiError> {
    let ctx = authorize(&state, &caller, &tenant, &catalog::STAFF_MANAGEMENT, &method).await?;
    let category: StaffCategory = category.parse()?;
    state
        .staff_service
        .delete(&ctx, category, staff_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/staff/accord
pub async fn grant_accord(
    State(state): State<AppState>,
    method: Method,
    caller: MaybeAuthUser,
    tenant: Tenant,
    ValidatedJson(req): ValidatedJson<GrantAccordRequest>,
) -> Result<Json<ApiResponse<VerificationState>>, ApiError> {
    let ctx = authorize(&state, &caller, &tenant, &catalog::STAFF_MANAGEMENT, &method).await?;
    let state_after = state.staff_service.grant_accord(&ctx, req.user_id).await?;
    Ok(Json(ApiResponse::ok(state_after)))
}
