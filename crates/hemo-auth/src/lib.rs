//! # hemo-auth
//!
//! Tenant resolution and access decisions for the hemodialysis center
//! platform, plus the credential plumbing around them.
//!
//! ## Modules
//!
//! - `tenant`: maps the `Host` header to a center
//! - `rbac`: operation policies and the access decision engine
//! - `directory`: identity, verification, staff, and center lookups
//! - `jwt`: access and refresh token issuance and validation
//! - `password`: Argon2id hashing and the password policy
//! - `verification`: one-time e-mail verification codes

pub mod directory;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod tenant;
pub mod verification;

pub use directory::{AccountStore, Directory, MemoryDirectory, PgDirectory};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordPolicy};
pub use rbac::{
    AccessDecisionEngine, AccessMode, AccessRequest, Decision, DenyReason, Grant, GrantBasis,
    OperationPolicy, Principal,
};
pub use tenant::{TenantResolution, TenantResolver};
pub use verification::generate_code;
