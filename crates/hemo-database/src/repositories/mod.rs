//! Repository implementations, one per aggregate.

pub mod center;
pub mod profile;
pub mod staff;
pub mod user;

pub use center::CenterRepository;
pub use profile::ProfileRepository;
pub use staff::StaffRepository;
pub use user::UserRepository;
