//! Maps an inbound request to the center it targets.

use std::sync::Arc;

use tracing::{debug, warn};

use hemo_core::config::TenancyConfig;
use hemo_core::error::AppError;
use hemo_core::result::AppResult;
use hemo_entity::center::Center;

use super::host::{HostClass, classify_host, normalize_host};
use crate::directory::Directory;

/// Outcome of tenant resolution for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantResolution {
    /// Administrative backend path; resolution did not run.
    Skipped,
    /// Root-domain traffic; no tenant.
    Root,
    /// The request targets this center.
    Center(Center),
}

impl TenantResolution {
    /// The resolved center, if any.
    pub fn center(&self) -> Option<&Center> {
        match self {
            Self::Center(center) => Some(center),
            Self::Skipped | Self::Root => None,
        }
    }

    /// Consume the resolution, keeping the center if any.
    pub fn into_center(self) -> Option<Center> {
        match self {
            Self::Center(center) => Some(center),
            Self::Skipped | Self::Root => None,
        }
    }
}

/// Resolves the `Host` header of a request to a center.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    config: TenancyConfig,
    directory: Arc<dyn Directory>,
}

impl TenantResolver {
    /// Create a resolver over `directory`.
    pub fn new(config: TenancyConfig, directory: Arc<dyn Directory>) -> Self {
        Self { config, directory }
    }

    /// Tenancy settings in use.
    pub fn config(&self) -> &TenancyConfig {
        &self.config
    }

    /// `/admin/...` and the bare `/admin` both fall under the admin prefix;
    /// `/administrators` does not.
    fn is_admin_path(&self, path: &str) -> bool {
        let prefix = self.config.admin_path_prefix.as_str();
        let bare = prefix.trim_end_matches('/');
        path.starts_with(prefix) || (!bare.is_empty() && path == bare)
    }

    /// Resolve a request given its path and raw `Host` header.
    ///
    /// A missing or malformed host is a bad request. A slug that names no
    /// center is a not-found error, distinct from root traffic.
    pub async fn resolve(&self, path: &str, host: Option<&str>) -> AppResult<TenantResolution> {
        if self.is_admin_path(path) {
            debug!(path = %path, "Administrative path; tenant resolution skipped");
            return Ok(TenantResolution::Skipped);
        }

        let raw = host.ok_or_else(|| AppError::bad_request("Missing Host header"))?;
        let normalized = normalize_host(raw)?;

        let slug = match classify_host(&normalized, &self.config) {
            HostClass::Root => {
                debug!(host = %raw, "Root traffic");
                return Ok(TenantResolution::Root);
            }
            HostClass::Candidate(slug) => slug,
        };

        match self.directory.find_center_by_slug(&slug).await? {
            Some(center) => {
                debug!(host = %raw, center_id = %center.id, slug = %slug, "Tenant resolved");
                Ok(TenantResolution::Center(center))
            }
            None => {
                warn!(host = %raw, slug = %slug, "No center for subdomain");
                Err(AppError::not_found("Tenant not found")
                    .with_details(serde_json::json!({ "sub_domain": slug })))
            }
        }
    }
}
