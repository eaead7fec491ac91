//! Staff category rows and the assignment they realize.
//!
//! Each category lives in its own table with one category-specific column.
//! The shared columns are modelled once as [`StaffPerson`] and flattened into
//! every category struct, both for `sqlx` decoding and for JSON output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hemo_core::types::{CenterId, StaffId, UserId};

use super::category::StaffCategory;
use super::role::Role;

/// Columns shared by every staff category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StaffPerson {
    /// Row identifier within its category table.
    pub id: StaffId,
    /// Identity bound by this row.
    pub user_id: UserId,
    /// Center the identity works for.
    pub center_id: CenterId,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// National identity card number.
    pub national_id: String,
    /// Role held in the center.
    pub role: Role,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Row of `administrative_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AdministrativeStaff {
    /// Shared columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: StaffPerson,
    /// Job title (secretary, manager...).
    pub job_title: String,
}

/// Row of `medical_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MedicalStaff {
    /// Shared columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: StaffPerson,
    /// Medical council registration number.
    pub council_number: String,
}

/// Row of `paramedical_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ParamedicalStaff {
    /// Shared columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: StaffPerson,
    /// Professional qualification.
    pub qualification: String,
}

/// Row of `technical_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TechnicalStaff {
    /// Shared columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: StaffPerson,
    /// Professional qualification.
    pub qualification: String,
}

/// Row of `worker_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WorkerStaff {
    /// Shared columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: StaffPerson,
    /// Job title (janitor, driver...).
    pub job_title: String,
}

/// Uniform view over the five category rows.
pub trait StaffMember {
    /// Category table this row belongs to.
    fn category(&self) -> StaffCategory;

    /// Shared columns.
    fn person(&self) -> &StaffPerson;

    /// Role held in the center.
    fn role(&self) -> Role {
        self.person().role
    }

    /// Center the identity works for.
    fn center_id(&self) -> CenterId {
        self.person().center_id
    }

    /// Identity bound by this row.
    fn user_id(&self) -> UserId {
        self.person().user_id
    }

    /// The assignment this row realizes.
    fn assignment(&self) -> StaffAssignment {
        let person = self.person();
        StaffAssignment {
            staff_id: person.id,
            user_id: person.user_id,
            center_id: person.center_id,
            role: person.role,
            category: self.category(),
        }
    }
}

macro_rules! impl_staff_member {
    ($ty:ty, $category:expr) => {
        impl StaffMember for $ty {
            fn category(&self) -> StaffCategory {
                $category
            }

            fn person(&self) -> &StaffPerson {
                &self.person
            }
        }
    };
}

impl_staff_member!(AdministrativeStaff, StaffCategory::Administrative);
impl_staff_member!(MedicalStaff, StaffCategory::Medical);
impl_staff_member!(ParamedicalStaff, StaffCategory::Paramedical);
impl_staff_member!(TechnicalStaff, StaffCategory::Technical);
impl_staff_member!(WorkerStaff, StaffCategory::Worker);

/// A staff row from any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum StaffRecord {
    /// Administrative row.
    Administrative(AdministrativeStaff),
    /// Medical row.
    Medical(MedicalStaff),
    /// Paramedical row.
    Paramedical(ParamedicalStaff),
    /// Technical row.
    Technical(TechnicalStaff),
    /// Worker row.
    Worker(WorkerStaff),
}

impl StaffMember for StaffRecord {
    fn category(&self) -> StaffCategory {
        match self {
            Self::Administrative(_) => StaffCategory::Administrative,
            Self::Medical(_) => StaffCategory::Medical,
            Self::Paramedical(_) => StaffCategory::Paramedical,
            Self::Technical(_) => StaffCategory::Technical,
            Self::Worker(_) => StaffCategory::Worker,
        }
    }

    fn person(&self) -> &StaffPerson {
        match self {
            Self::Administrative(s) => &s.person,
            Self::Medical(s) => &s.person,
            Self::Paramedical(s) => &s.person,
            Self::Technical(s) => &s.person,
            Self::Worker(s) => &s.person,
        }
    }
}

/// Binding of one identity to one center with one role.
///
/// Produced by the single tagged lookup across all category tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StaffAssignment {
    /// Row identifier within the category table.
    pub staff_id: StaffId,
    /// Bound identity.
    pub user_id: UserId,
    /// Center of the assignment.
    pub center_id: CenterId,
    /// Role held.
    pub role: Role,
    /// Category table the row lives in.
    pub category: StaffCategory,
}

/// Category-specific column for a new staff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryDetails {
    /// Administrative job title.
    Administrative { job_title: String },
    /// Medical council number.
    Medical { council_number: String },
    /// Paramedical qualification.
    Paramedical { qualification: String },
    /// Technical qualification.
    Technical { qualification: String },
    /// Worker job title.
    Worker { job_title: String },
}

impl CategoryDetails {
    /// Category these details belong to.
    pub fn category(&self) -> StaffCategory {
        match self {
            Self::Administrative { .. } => StaffCategory::Administrative,
            Self::Medical { .. } => StaffCategory::Medical,
            Self::Paramedical { .. } => StaffCategory::Paramedical,
            Self::Technical { .. } => StaffCategory::Technical,
            Self::Worker { .. } => StaffCategory::Worker,
        }
    }

    /// Build details for `category` from its single attribute value.
    pub fn for_category(category: StaffCategory, value: String) -> Self {
        match category {
            StaffCategory::Administrative => Self::Administrative { job_title: value },
            StaffCategory::Medical => Self::Medical {
                council_number: value,
            },
            StaffCategory::Paramedical => Self::Paramedical {
                qualification: value,
            },
            StaffCategory::Technical => Self::Technical {
                qualification: value,
            },
            StaffCategory::Worker => Self::Worker { job_title: value },
        }
    }

    /// The attribute value, whatever its column name.
    pub fn value(&self) -> &str {
        match self {
            Self::Administrative { job_title } | Self::Worker { job_title } => job_title,
            Self::Medical { council_number } => council_number,
            Self::Paramedical { qualification } | Self::Technical { qualification } => {
                qualification
            }
        }
    }
}

/// Data required to insert a staff row.
#[derive(Debug, Clone)]
pub struct NewStaff {
    /// Identity created for this staff member.
    pub user_id: UserId,
    /// Center the row belongs to.
    pub center_id: CenterId,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// National identity card number.
    pub national_id: String,
    /// Role held.
    pub role: Role,
    /// Category and its attribute.
    pub details: CategoryDetails,
}

impl NewStaff {
    /// Materialize the row as it will be stored.
    pub fn into_record(self, id: StaffId, created_at: DateTime<Utc>) -> StaffRecord {
        let person = StaffPerson {
            id,
            user_id: self.user_id,
            center_id: self.center_id,
            last_name: self.last_name,
            first_name: self.first_name,
            national_id: self.national_id,
            role: self.role,
            created_at,
        };
        match self.details {
            CategoryDetails::Administrative { job_title } => {
                StaffRecord::Administrative(AdministrativeStaff { person, job_title })
            }
            CategoryDetails::Medical { council_number } => StaffRecord::Medical(MedicalStaff {
                person,
                council_number,
            }),
            CategoryDetails::Paramedical { qualification } => {
                StaffRecord::Paramedical(ParamedicalStaff {
                    person,
                    qualification,
                })
            }
            CategoryDetails::Technical { qualification } => {
                StaffRecord::Technical(TechnicalStaff {
                    person,
                    qualification,
                })
            }
            CategoryDetails::Worker { job_title } => {
                StaffRecord::Worker(WorkerStaff { person, job_title })
            }
        }
    }
}
