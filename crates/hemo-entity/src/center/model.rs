//! Center entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hemo_core::types::CenterId;

/// A hemodialysis center, the unit of data isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Center {
    /// Unique center identifier.
    pub id: CenterId,
    /// Normalized subdomain slug (unique).
    pub sub_domain: String,
    /// Display label.
    pub label: String,
    /// Contact phone number.
    pub tel: Option<String>,
    /// Contact e-mail address.
    pub mail: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// When the center was created.
    pub created_at: DateTime<Utc>,
    /// When the center was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a center. `sub_domain` must already be normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCenter {
    /// Normalized subdomain slug.
    pub sub_domain: String,
    /// Display label.
    pub label: String,
    /// Contact phone number.
    pub tel: Option<String>,
    /// Contact e-mail address.
    pub mail: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}
