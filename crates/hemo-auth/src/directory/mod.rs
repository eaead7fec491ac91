//! Lookups the tenant resolver and the decision engine depend on, and the
//! account store that the management services write through.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use tracing::error;

use hemo_core::result::AppResult;
use hemo_core::types::{CenterId, PageRequest, PageResponse, StaffId, UserId};
use hemo_entity::center::{Center, CreateCenter};
use hemo_entity::staff::{NewStaff, StaffAssignment, StaffCategory, StaffRecord};
use hemo_entity::user::{CreateUser, User, VerificationState};

pub use memory::MemoryDirectory;
pub use postgres::PgDirectory;

/// Read side used on every request.
#[async_trait]
pub trait Directory: Send + Sync + std::fmt::Debug {
    /// Fetch a center by its normalized slug.
    async fn find_center_by_slug(&self, slug: &str) -> AppResult<Option<Center>>;

    /// Fetch the verification state of an identity.
    async fn find_verification(&self, user_id: UserId) -> AppResult<Option<VerificationState>>;

    /// Every staff row bound to the identity, in probe order.
    async fn find_staff_assignments(&self, user_id: UserId) -> AppResult<Vec<StaffAssignment>>;

    /// Verify the identity if `code` matches and it is not verified yet.
    ///
    /// Returns `None` when the condition did not hold; a second call with
    /// the same code therefore always returns `None`.
    async fn consume_verification_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>>;

    /// The single assignment of the identity.
    async fn find_staff_assignment(&self, user_id: UserId) -> AppResult<Option<StaffAssignment>> {
        let matches = self.find_staff_assignments(user_id).await?;
        Ok(first_in_probe_order(user_id, matches))
    }
}

/// Write side used by center, staff, and verification management.
#[async_trait]
pub trait AccountStore: Directory {
    /// Fetch a user by id.
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Fetch a user by username (case-insensitive).
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Delete a user together with its profile and staff row.
    async fn delete_user(&self, id: UserId) -> AppResult<bool>;

    /// Insert the unverified profile of a new identity.
    async fn create_verification(&self, user_id: UserId, code: &str)
    -> AppResult<VerificationState>;

    /// Store a fresh code for an unverified identity.
    async fn replace_verification_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>>;

    /// Set the accord flag of a verified identity.
    async fn grant_admin_accord(&self, user_id: UserId) -> AppResult<Option<VerificationState>>;

    /// Fetch a center by id.
    async fn find_center_by_id(&self, id: CenterId) -> AppResult<Option<Center>>;

    /// Insert a center.
    async fn create_center(&self, data: &CreateCenter) -> AppResult<Center>;

    /// Page through centers, optionally filtered by label.
    async fn list_centers(
        &self,
        label: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Center>>;

    /// Insert a staff row.
    async fn create_staff(&self, data: &NewStaff) -> AppResult<StaffRecord>;

    /// Rows of one category belonging to a center.
    async fn list_staff(
        &self,
        category: StaffCategory,
        center_id: CenterId,
    ) -> AppResult<Vec<StaffRecord>>;

    /// One row of a category, only if it belongs to the center.
    async fn find_staff(
        &self,
        category: StaffCategory,
        id: StaffId,
        center_id: CenterId,
    ) -> AppResult<Option<StaffRecord>>;
}

/// Pick the assignment that wins the category probe.
///
/// An identity bound in more than one category breaks the one-assignment
/// invariant; the first match in probe order is used and the rest reported.
pub fn first_in_probe_order(
    user_id: UserId,
    mut matches: Vec<StaffAssignment>,
) -> Option<StaffAssignment> {
    matches.sort_by_key(|a| a.category.probe_rank());

    if matches.len() > 1 {
        let categories: Vec<&str> = matches.iter().map(|a| a.category.as_str()).collect();
        error!(
            user_id = %user_id,
            categories = ?categories,
            "Identity holds more than one staff assignment; using the first in probe order"
        );
    }

    matches.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemo_entity::staff::Role;

    fn assignment(user_id: UserId, category: StaffCategory, role: Role) -> StaffAssignment {
        StaffAssignment {
            staff_id: StaffId::new(),
            user_id,
            center_id: CenterId::new(),
            role,
            category,
        }
    }

    #[test]
    fn test_first_in_probe_order() {
        let user_id = UserId::new();
        let picked = first_in_probe_order(
            user_id,
            vec![
                assignment(user_id, StaffCategory::Worker, Role::Viewer),
                assignment(user_id, StaffCategory::Medical, Role::LocalAdmin),
            ],
        )
        .unwrap();
        assert_eq!(picked.category, StaffCategory::Medical);
        assert_eq!(picked.role, Role::LocalAdmin);
    }

    #[test]
    fn test_no_assignment() {
        assert!(first_in_probe_order(UserId::new(), Vec::new()).is_none());
    }
}
