//! Superuser-only center management and the public subdomain check.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use hemo_auth::directory::{AccountStore, Directory};
use hemo_core::config::TenancyConfig;
use hemo_core::error::AppError;
use hemo_core::types::{PageRequest, PageResponse};
use hemo_entity::center::{Center, CreateCenter, validate_slug};

use crate::context::RequestContext;

/// Fields supplied when creating a center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCenterInput {
    /// Requested subdomain, normalized before storage.
    pub sub_domain: String,
    /// Display label.
    pub label: String,
    /// Contact phone number.
    pub tel: Option<String>,
    /// Contact e-mail.
    pub mail: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Whether a subdomain names an existing center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainCheck {
    /// Normalized subdomain that was checked.
    pub sub_domain: String,
    /// Whether a center owns it.
    pub exists: bool,
    /// Label of that center.
    pub label: Option<String>,
}

/// Creates and lists centers.
#[derive(Debug, Clone)]
pub struct CenterService {
    store: Arc<dyn AccountStore>,
    tenancy: TenancyConfig,
}

impl CenterService {
    /// Create a new center service.
    pub fn new(store: Arc<dyn AccountStore>, tenancy: TenancyConfig) -> Self {
        Self { store, tenancy }
    }

    /// Create a center. Superusers only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateCenterInput,
    ) -> Result<Center, AppError> {
        ctx.require_superuser()?;

        let sub_domain = validate_slug(&input.sub_domain)?;
        if self
            .tenancy
            .reserved_slugs
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&sub_domain))
        {
            return Err(AppError::validation(format!(
                "Subdomain '{sub_domain}' is reserved"
            )));
        }

        let label = input.label.trim().to_string();
        if label.is_empty() {
            return Err(AppError::validation("Label is required"));
        }

        let center = self
            .store
            .create_center(&CreateCenter {
                sub_domain,
                label,
                tel: non_blank(input.tel),
                mail: non_blank(input.mail),
                address: non_blank(input.address),
            })
            .await?;

        info!(
            center_id = %center.id,
            sub_domain = %center.sub_domain,
            created_by = %ctx.user_id(),
            "Center created"
        );
        Ok(center)
    }

    /// Page through centers. Superusers only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        label: Option<&str>,
        page: &PageRequest,
    ) -> Result<PageResponse<Center>, AppError> {
        ctx.require_superuser()?;
        let label = label.map(str::trim).filter(|l| !l.is_empty());
        self.store.list_centers(label, page).await
    }

    /// Report whether `raw` names a center, after normalization.
    pub async fn check_subdomain(&self, raw: &str) -> Result<SubdomainCheck, AppError> {
        let sub_domain = validate_slug(raw)?;
        let center = self.store.find_center_by_slug(&sub_domain).await?;
        Ok(SubdomainCheck {
            sub_domain,
            exists: center.is_some(),
            label: center.map(|c| c.label),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
