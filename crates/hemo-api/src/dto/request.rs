//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use hemo_core::types::{PageRequest, UserId};
use hemo_entity::staff::Role;
use hemo_service::{CreateCenterInput, NewStaffInput};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Verification code submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Identity being verified.
    pub user_id: UserId,
    /// Code received by e-mail.
    #[validate(length(min = 1, max = 16, message = "Verification code is required"))]
    pub code: String,
}

/// Request to issue a new verification code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    /// Identity the code is for.
    pub user_id: UserId,
}

/// Request to approve a verified staff member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantAccordRequest {
    /// Staff member's identity.
    pub user_id: UserId,
}

/// Create center request (superuser).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCenterRequest {
    /// Requested subdomain.
    #[validate(length(min = 1, max = 63))]
    pub sub_domain: String,
    /// Display label.
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    /// Contact phone number.
    #[validate(length(max = 30))]
    pub tel: Option<String>,
    /// Contact e-mail.
    #[validate(email)]
    pub mail: Option<String>,
    /// Postal address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

impl From<CreateCenterRequest> for CreateCenterInput {
    fn from(req: CreateCenterRequest) -> Self {
        Self {
            sub_domain: req.sub_domain,
            label: req.label,
            tel: req.tel,
            mail: req.mail,
            address: req.address,
        }
    }
}

/// Create staff request; the category comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStaffRequest {
    /// Login name.
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    /// E-mail address.
    #[validate(email)]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1))]
    pub password: String,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Given name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    /// National identity card number.
    #[validate(length(min = 1, max = 20))]
    pub national_id: String,
    /// Role; defaults per category.
    pub role: Option<Role>,
    /// Job title, council number, or qualification.
    #[validate(length(min = 1, max = 100))]
    pub detail: String,
}

impl From<CreateStaffRequest> for NewStaffInput {
    fn from(req: CreateStaffRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            last_name: req.last_name,
            first_name: req.first_name,
            national_id: req.national_id,
            role: req.role,
            detail: req.detail,
        }
    }
}

/// Query of the center listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterListQuery {
    /// Case-insensitive label filter.
    pub label: Option<String>,
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 10, max: 100).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl CenterListQuery {
    /// Converts the paging fields to a `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

/// Query of the subdomain check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdomainQuery {
    /// Subdomain to look up.
    pub sub_domain: String,
}

/// Access check request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccessCheckRequest {
    /// Operation name from the catalog.
    #[validate(length(min = 1))]
    pub operation: String,
    /// HTTP method the caller intends to use.
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".to_string()
}
