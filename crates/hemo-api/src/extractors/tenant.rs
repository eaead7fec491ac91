//! Access to the tenant stored by the tenant middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hemo_auth::tenant::TenantResolution;
use hemo_core::error::AppError;
use hemo_entity::center::Center;

use crate::error::ApiError;
use crate::middleware::tenant::TenantContext;

/// Tenant resolution of the current request.
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantResolution);

impl Tenant {
    /// The resolved center, if any.
    pub fn center(&self) -> Option<&Center> {
        self.0.center()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .map(|ctx| Self(ctx.0.clone()))
            .ok_or_else(|| AppError::internal("Tenant middleware is not installed").into())
    }
}

/// A center was resolved; root and administrative traffic is rejected.
#[derive(Debug, Clone)]
pub struct CenterTenant(pub Center);

impl<S: Send + Sync> FromRequestParts<S> for CenterTenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Tenant(resolution) = Tenant::from_request_parts(parts, state).await?;
        resolution.into_center().map(Self).ok_or_else(|| {
            AppError::bad_request("This endpoint must be called on a center subdomain").into()
        })
    }
}
