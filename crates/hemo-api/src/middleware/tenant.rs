//! Resolves the center of every request before it reaches a handler.
//!
//! The outcome is stored as a [`TenantContext`] request extension. Resolution
//! failures (bad host, unknown subdomain) end the request here.

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::Response;

use hemo_auth::tenant::TenantResolution;
use hemo_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Tenant resolved for the current request.
#[derive(Debug, Clone)]
pub struct TenantContext(pub TenantResolution);

/// Middleware that runs the tenant resolver.
pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let host = match request.headers().get(HOST) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AppError::bad_request("Host header is not valid ASCII"))?
                .to_string(),
        ),
        None => request.uri().authority().map(|a| a.to_string()),
    };

    let resolution = state
        .tenant_resolver
        .resolve(request.uri().path(), host.as_deref())
        .await?;

    request.extensions_mut().insert(TenantContext(resolution));
    Ok(next.run(request).await)
}
