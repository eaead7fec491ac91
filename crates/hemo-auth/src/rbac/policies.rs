//! Static operation policies.
//!
//! Every tenant-scoped operation declares which roles may perform it and,
//! optionally, which roles may perform it read-only. Policies are constants;
//! nothing is loaded at runtime.

use serde::Serialize;

use hemo_entity::staff::Role;

/// Whether an operation observes or changes data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// GET, HEAD, OPTIONS.
    Read,
    /// Everything else.
    Write,
}

impl AccessMode {
    /// Classify an HTTP method name.
    pub fn for_method(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" | "HEAD" | "OPTIONS" => Self::Read,
            _ => Self::Write,
        }
    }
}

/// Role requirements of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationPolicy {
    /// Stable operation name used in logs.
    pub name: &'static str,
    /// Roles allowed to read and write.
    pub allowed_roles: &'static [Role],
    /// Roles allowed to read only.
    pub read_only_roles: &'static [Role],
}

impl OperationPolicy {
    /// Policy with no read-only roles.
    pub const fn new(name: &'static str, allowed_roles: &'static [Role]) -> Self {
        Self {
            name,
            allowed_roles,
            read_only_roles: &[],
        }
    }

    /// Add read-only roles.
    pub const fn with_read_only(mut self, roles: &'static [Role]) -> Self {
        self.read_only_roles = roles;
        self
    }

    /// Whether `role` is in the allowed set.
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// Whether `role` is in the read-only set.
    pub fn allows_read_only(&self, role: Role) -> bool {
        self.read_only_roles.contains(&role)
    }
}

/// Operations of the platform and their role requirements.
pub mod catalog {
    use super::OperationPolicy;
    use hemo_entity::staff::Role::{LocalAdmin, MedicalParaStaff, Technical, Viewer};

    /// Create, list, and delete staff; grant accord; resend codes.
    pub const STAFF_MANAGEMENT: OperationPolicy =
        OperationPolicy::new("staff_management", &[LocalAdmin]);

    /// Physician directory used when recording sessions.
    pub const MEDICAL_STAFF_DIRECTORY: OperationPolicy =
        OperationPolicy::new("medical_staff_directory", &[LocalAdmin, MedicalParaStaff]);

    /// Patient records, deceased declarations, and medical activity.
    pub const PATIENT_RECORDS: OperationPolicy =
        OperationPolicy::new("patient_records", &[LocalAdmin, MedicalParaStaff])
            .with_read_only(&[Viewer]);

    /// Hemodialysis sessions.
    pub const HEMODIALYSIS_SESSIONS: OperationPolicy =
        OperationPolicy::new("hemodialysis_sessions", &[LocalAdmin, MedicalParaStaff])
            .with_read_only(&[Viewer]);

    /// Transmittable disease, complication, and transplantation events.
    pub const CLINICAL_EVENTS: OperationPolicy =
        OperationPolicy::new("clinical_events", &[LocalAdmin, MedicalParaStaff])
            .with_read_only(&[Viewer]);

    /// Reference tables (diseases, complications, transplantations, types).
    pub const MEDICAL_REFERENCES: OperationPolicy =
        OperationPolicy::new("medical_references", &[LocalAdmin, MedicalParaStaff]);

    /// Dialysis machines.
    pub const MACHINES: OperationPolicy =
        OperationPolicy::new("machines", &[LocalAdmin, Technical]).with_read_only(&[Viewer]);

    /// Membranes and filters.
    pub const CONSUMABLES: OperationPolicy =
        OperationPolicy::new("consumables", &[LocalAdmin, Technical]);

    /// Session outcome prediction.
    pub const PREDICTION: OperationPolicy =
        OperationPolicy::new("prediction", &[LocalAdmin, MedicalParaStaff]);

    /// Every policy, for listing.
    pub const ALL: &[OperationPolicy] = &[
        STAFF_MANAGEMENT,
        MEDICAL_STAFF_DIRECTORY,
        PATIENT_RECORDS,
        HEMODIALYSIS_SESSIONS,
        CLINICAL_EVENTS,
        MEDICAL_REFERENCES,
        MACHINES,
        CONSUMABLES,
        PREDICTION,
    ];

    /// Look a policy up by name.
    pub fn find(name: &str) -> Option<&'static OperationPolicy> {
        ALL.iter().find(|p| p.name == name)
    }
}
