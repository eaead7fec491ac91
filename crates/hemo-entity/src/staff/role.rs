//! Closed enumeration of staff roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hemo_core::error::AppError;

/// Role carried by a staff assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "staff_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full control of one center's data.
    LocalAdmin,
    /// May submit records.
    Submitter,
    /// Medical and paramedical clinical staff.
    MedicalParaStaff,
    /// Read-only access where an operation allows it.
    Viewer,
    /// Equipment and consumables.
    Technical,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::LocalAdmin,
        Role::Submitter,
        Role::MedicalParaStaff,
        Role::Viewer,
        Role::Technical,
    ];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalAdmin => "LOCAL_ADMIN",
            Self::Submitter => "SUBMITTER",
            Self::MedicalParaStaff => "MEDICAL_PARA_STAFF",
            Self::Viewer => "VIEWER",
            Self::Technical => "TECHNICAL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::validation(format!("Unknown role: {s}")))
    }
}
