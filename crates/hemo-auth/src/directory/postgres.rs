//! PostgreSQL-backed directory composed from the repositories.

use async_trait::async_trait;
use sqlx::PgPool;

use hemo_core::result::AppResult;
use hemo_core::types::{CenterId, PageRequest, PageResponse, StaffId, UserId};
use hemo_database::repositories::{
    CenterRepository, ProfileRepository, StaffRepository, UserRepository,
};
use hemo_entity::center::{Center, CreateCenter};
use hemo_entity::staff::{NewStaff, StaffAssignment, StaffCategory, StaffRecord};
use hemo_entity::user::{CreateUser, User, VerificationState};

use super::{AccountStore, Directory};

/// Directory over the PostgreSQL schema.
#[derive(Debug, Clone)]
pub struct PgDirectory {
    centers: CenterRepository,
    users: UserRepository,
    profiles: ProfileRepository,
    staff: StaffRepository,
}

impl PgDirectory {
    /// Build every repository over the same pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            centers: CenterRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool.clone()),
            staff: StaffRepository::new(pool),
        }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn find_center_by_slug(&self, slug: &str) -> AppResult<Option<Center>> {
        self.centers.find_by_slug(slug).await
    }

    async fn find_verification(&self, user_id: UserId) -> AppResult<Option<VerificationState>> {
        self.profiles.find_by_user(user_id).await
    }

    async fn find_staff_assignments(&self, user_id: UserId) -> AppResult<Vec<StaffAssignment>> {
        self.staff.find_assignments(user_id).await
    }

    async fn consume_verification_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>> {
        self.profiles.consume_code(user_id, code).await
    }
}

#[async_trait]
impl AccountStore for PgDirectory {
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.users.find_by_username(username).await
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        self.users.create(data).await
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        self.users.delete(id).await
    }

    async fn create_verification(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<VerificationState> {
        self.profiles.create(user_id, code).await
    }

    async fn replace_verification_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>> {
        self.profiles.replace_code(user_id, code).await
    }

    async fn grant_admin_accord(&self, user_id: UserId) -> AppResult<Option<VerificationState>> {
        self.profiles.grant_accord(user_id).await
    }

    async fn find_center_by_id(&self, id: CenterId) -> AppResult<Option<Center>> {
        self.centers.find_by_id(id).await
    }

    async fn create_center(&self, data: &CreateCenter) -> AppResult<Center> {
        self.centers.create(data).await
    }

    async fn list_centers(
        &self,
        label: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Center>> {
        self.centers.list(label, page).await
    }

    async fn create_staff(&self, data: &NewStaff) -> AppResult<StaffRecord> {
        self.staff.create(data).await
    }

    async fn list_staff(
        &self,
        category: StaffCategory,
        center_id: CenterId,
    ) -> AppResult<Vec<StaffRecord>> {
        self.staff.list_by_center(category, center_id).await
    }

    async fn find_staff(
        &self,
        category: StaffCategory,
        id: StaffId,
        center_id: CenterId,
    ) -> AppResult<Option<StaffRecord>> {
        self.staff.find_in_center(category, id, center_id).await
    }
}
