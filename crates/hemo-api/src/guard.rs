//! Per-operation access guard.

use axum::http::Method;

use hemo_auth::rbac::{AccessMode, AccessRequest, OperationPolicy, Principal};
use hemo_service::RequestContext;

use crate::error::ApiError;
use crate::extractors::{MaybeAuthUser, Tenant};
use crate::state::AppState;

/// Run the access engine for `policy` and build the service context.
///
/// The access mode follows the HTTP method. Denials become 401 or 403
/// responses with a uniform body; the reason only reaches the logs.
pub async fn authorize(
    state: &AppState,
    caller: &MaybeAuthUser,
    tenant: &Tenant,
    policy: &OperationPolicy,
    method: &Method,
) -> Result<RequestContext, ApiError> {
    let principal: Option<&Principal> = caller.0.as_ref();
    let decision = state
        .access_engine
        .decide(AccessRequest {
            principal,
            tenant: tenant.center(),
            policy,
            mode: AccessMode::for_method(method.as_str()),
        })
        .await?;

    let grant = decision.into_result()?;
    Ok(RequestContext::from_grant(grant))
}
