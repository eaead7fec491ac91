//! Operation catalog and access checks.
//!
//! Front-ends and the out-of-process record services ask here whether the
//! caller may perform a catalog operation in the resolved center.

use axum::Json;
use axum::extract::State;

use hemo_auth::rbac::{AccessMode, AccessRequest, catalog};
use hemo_core::error::AppError;

use crate::dto::request::AccessCheckRequest;
use crate::dto::response::{AccessCheckResponse, ApiResponse, PolicyResponse};
use crate::error::ApiError;
use crate::extractors::{MaybeAuthUser, Tenant, ValidatedJson};
use crate::state::AppState;

/// GET /api/policies
pub async fn list_policies() -> Json<ApiResponse<Vec<PolicyResponse>>> {
    Json(ApiResponse::ok(
        catalog::ALL.iter().map(PolicyResponse::from).collect(),
    ))
}

/// POST /api/access/check
///
/// Answers with `allowed: false` instead of an error when denied; the
/// reason is only logged.
pub async fn check_access(
    State(state): State<AppState>,
    MaybeAuthUser(principal): MaybeAuthUser,
    tenant: Tenant,
    ValidatedJson(req): ValidatedJson<AccessCheckRequest>,
) -> Result<Json<ApiResponse<AccessCheckResponse>>, ApiError> {
    let policy = catalog::find(&req.operation)
        .ok_or_else(|| AppError::not_found(format!("Unknown operation '{}'", req.operation)))?;
    let mode = AccessMode::for_method(&req.method);

    let decision = state
        .access_engine
        .decide(AccessRequest {
            principal: principal.as_ref(),
            tenant: tenant.center(),
            policy,
            mode,
        })
        .await?;

    Ok(Json(ApiResponse::ok(AccessCheckResponse {
        operation: policy.name,
        mode,
        allowed: decision.is_allowed(),
    })))
}
