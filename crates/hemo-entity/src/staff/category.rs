//! The five disjoint staff categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hemo_core::error::AppError;

use super::role::Role;

/// Staff category; each one is backed by its own table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "staff_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StaffCategory {
    /// Administrative staff.
    Administrative,
    /// Physicians.
    Medical,
    /// Nurses and other paramedical staff.
    Paramedical,
    /// Technicians.
    Technical,
    /// Support workers.
    Worker,
}

impl StaffCategory {
    /// Order in which categories are probed when resolving an assignment.
    pub const PROBE_ORDER: [StaffCategory; 5] = [
        StaffCategory::Administrative,
        StaffCategory::Medical,
        StaffCategory::Paramedical,
        StaffCategory::Technical,
        StaffCategory::Worker,
    ];

    /// Position in [`Self::PROBE_ORDER`].
    pub fn probe_rank(&self) -> usize {
        match self {
            Self::Administrative => 0,
            Self::Medical => 1,
            Self::Paramedical => 2,
            Self::Technical => 3,
            Self::Worker => 4,
        }
    }

    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Administrative => "administrative_staff",
            Self::Medical => "medical_staff",
            Self::Paramedical => "paramedical_staff",
            Self::Technical => "technical_staff",
            Self::Worker => "worker_staff",
        }
    }

    /// Role assigned when a creation request does not name one.
    pub fn default_role(&self) -> Role {
        match self {
            Self::Administrative | Self::Worker => Role::Viewer,
            Self::Medical | Self::Paramedical => Role::MedicalParaStaff,
            Self::Technical => Role::Technical,
        }
    }

    /// Lowercase name, as used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrative => "administrative",
            Self::Medical => "medical",
            Self::Paramedical => "paramedical",
            Self::Technical => "technical",
            Self::Worker => "worker",
        }
    }
}

impl fmt::Display for StaffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PROBE_ORDER
            .into_iter()
            .find(|c| c.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| AppError::not_found(format!("Unknown staff category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_rank_matches_order() {
        for (i, category) in StaffCategory::PROBE_ORDER.iter().enumerate() {
            assert_eq!(category.probe_rank(), i);
        }
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(
            "Paramedical".parse::<StaffCategory>().unwrap(),
            StaffCategory::Paramedical
        );
        assert!("nurse".parse::<StaffCategory>().is_err());
    }
}
