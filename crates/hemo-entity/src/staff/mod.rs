//! Staff entities: the five category tables and the role they carry.

pub mod category;
pub mod model;
pub mod role;

pub use category::StaffCategory;
pub use model::{
    AdministrativeStaff, CategoryDetails, MedicalStaff, NewStaff, ParamedicalStaff,
    StaffAssignment, StaffMember, StaffPerson, StaffRecord, TechnicalStaff, WorkerStaff,
};
pub use role::Role;
