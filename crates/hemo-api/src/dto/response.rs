//! Response DTOs.

use serde::{Deserialize, Serialize};

use hemo_auth::rbac::{AccessMode, OperationPolicy};
use hemo_entity::staff::Role;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// One entry of the operation catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyResponse {
    /// Operation name.
    pub name: &'static str,
    /// Roles allowed to read and write.
    pub allowed_roles: Vec<Role>,
    /// Roles allowed to read only.
    pub read_only_roles: Vec<Role>,
}

impl From<&OperationPolicy> for PolicyResponse {
    fn from(policy: &OperationPolicy) -> Self {
        Self {
            name: policy.name,
            allowed_roles: policy.allowed_roles.to_vec(),
            read_only_roles: policy.read_only_roles.to_vec(),
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Serialize)]
pub struct AccessCheckResponse {
    /// Operation checked.
    pub operation: &'static str,
    /// Read or write.
    pub mode: AccessMode,
    /// Whether the caller would be allowed.
    pub allowed: bool,
}
