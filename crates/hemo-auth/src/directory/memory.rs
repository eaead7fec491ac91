//! In-memory directory for single-process use and tests.
//!
//! Mirrors the PostgreSQL constraints that matter to callers: unique
//! usernames and slugs, one row per identity and national id within a
//! category table, and cascading deletes from users.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use hemo_core::error::AppError;
use hemo_core::result::AppResult;
use hemo_core::types::{CenterId, PageRequest, PageResponse, StaffId, UserId};
use hemo_entity::center::{Center, CreateCenter};
use hemo_entity::staff::{NewStaff, StaffAssignment, StaffCategory, StaffMember, StaffRecord};
use hemo_entity::user::{CreateUser, User, VerificationState};

use super::{AccountStore, Directory};

#[derive(Debug, Default)]
struct DirectoryState {
    centers: HashMap<CenterId, Center>,
    users: HashMap<UserId, User>,
    profiles: HashMap<UserId, VerificationState>,
    staff: Vec<StaffRecord>,
}

/// Directory held in a Tokio mutex.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    state: Arc<Mutex<DirectoryState>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite an identity's verification state without lifecycle checks.
    pub async fn put_verification(&self, profile: VerificationState) {
        let mut state = self.state.lock().await;
        state.profiles.insert(profile.user_id, profile);
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_center_by_slug(&self, slug: &str) -> AppResult<Option<Center>> {
        let state = self.state.lock().await;
        Ok(state
            .centers
            .values()
            .find(|c| c.sub_domain == slug)
            .cloned())
    }

    async fn find_verification(&self, user_id: UserId) -> AppResult<Option<VerificationState>> {
        let state = self.state.lock().await;
        Ok(state.profiles.get(&user_id).cloned())
    }

    async fn find_staff_assignments(&self, user_id: UserId) -> AppResult<Vec<StaffAssignment>> {
        let state = self.state.lock().await;
        let mut matches: Vec<StaffAssignment> = state
            .staff
            .iter()
            .filter(|s| s.user_id() == user_id)
            .map(|s| s.assignment())
            .collect();
        matches.sort_by_key(|a| a.category.probe_rank());
        Ok(matches)
    }

    async fn consume_verification_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>> {
        let mut state = self.state.lock().await;
        let Some(profile) = state.profiles.get_mut(&user_id) else {
            return Ok(None);
        };
        if profile.is_verified || profile.verification_code.as_deref() != Some(code) {
            return Ok(None);
        }
        profile.is_verified = true;
        profile.verification_code = None;
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }
}

#[async_trait]
impl AccountStore for MemoryDirectory {
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| same_username(&u.username, username))
            .cloned())
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state
            .users
            .values()
            .any(|u| same_username(&u.username, &data.username))
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            is_superuser: data.is_superuser,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let removed = state.users.remove(&id).is_some();
        if removed {
            state.profiles.remove(&id);
            state.staff.retain(|s| s.user_id() != id);
        }
        Ok(removed)
    }

    async fn create_verification(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<VerificationState> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::database(format!(
                "Profile references missing user {user_id}"
            )));
        }
        if state.profiles.contains_key(&user_id) {
            return Err(AppError::conflict(format!(
                "User {user_id} already has a profile"
            )));
        }
        let profile = VerificationState {
            user_id,
            verification_code: Some(code.to_string()),
            is_verified: false,
            admin_accord: false,
            updated_at: Utc::now(),
        };
        state.profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn replace_verification_code(
        &self,
        user_id: UserId,
        code: &str,
    ) -> AppResult<Option<VerificationState>> {
        let mut state = self.state.lock().await;
        match state.profiles.get_mut(&user_id) {
            Some(profile) if !profile.is_verified => {
                profile.verification_code = Some(code.to_string());
                profile.updated_at = Utc::now();
                Ok(Some(profile.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn grant_admin_accord(&self, user_id: UserId) -> AppResult<Option<VerificationState>> {
        let mut state = self.state.lock().await;
        match state.profiles.get_mut(&user_id) {
            Some(profile) if profile.is_verified => {
                profile.admin_accord = true;
                profile.updated_at = Utc::now();
                Ok(Some(profile.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_center_by_id(&self, id: CenterId) -> AppResult<Option<Center>> {
        let state = self.state.lock().await;
        Ok(state.centers.get(&id).cloned())
    }

    async fn create_center(&self, data: &CreateCenter) -> AppResult<Center> {
        let mut state = self.state.lock().await;
        if state
            .centers
            .values()
            .any(|c| c.sub_domain == data.sub_domain)
        {
            return Err(AppError::conflict(format!(
                "Subdomain '{}' is already taken",
                data.sub_domain
            )));
        }
        let now = Utc::now();
        let center = Center {
            id: CenterId::new(),
            sub_domain: data.sub_domain.clone(),
            label: data.label.clone(),
            tel: data.tel.clone(),
            mail: data.mail.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        };
        state.centers.insert(center.id, center.clone());
        Ok(center)
    }

    async fn list_centers(
        &self,
        label: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Center>> {
        let state = self.state.lock().await;
        let needle = label.map(str::to_lowercase);
        let mut centers: Vec<Center> = state
            .centers
            .values()
            .filter(|c| {
                needle
                    .as_deref()
                    .is_none_or(|n| c.label.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        centers.sort_by(|a, b| {
            a.label
                .cmp(&b.label)
                .then_with(|| a.sub_domain.cmp(&b.sub_domain))
        });

        let total = centers.len() as u64;
        let items = centers
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn create_staff(&self, data: &NewStaff) -> AppResult<StaffRecord> {
        let mut state = self.state.lock().await;
        let category = data.details.category();

        if !state.users.contains_key(&data.user_id) {
            return Err(AppError::database(format!(
                "Staff row references missing user {}",
                data.user_id
            )));
        }
        if !state.centers.contains_key(&data.center_id) {
            return Err(AppError::database(format!(
                "Staff row references missing center {}",
                data.center_id
            )));
        }
        let same_table = state.staff.iter().filter(|s| s.category() == category);
        for existing in same_table {
            if existing.person().national_id == data.national_id {
                return Err(AppError::conflict(format!(
                    "National id '{}' is already registered",
                    data.national_id
                )));
            }
            if existing.user_id() == data.user_id {
                return Err(AppError::conflict(format!(
                    "User {} already has a {category} staff row",
                    data.user_id
                )));
            }
        }

        let record = data.clone().into_record(StaffId::new(), Utc::now());
        state.staff.push(record.clone());
        Ok(record)
    }

    async fn list_staff(
        &self,
        category: StaffCategory,
        center_id: CenterId,
    ) -> AppResult<Vec<StaffRecord>> {
        let state = self.state.lock().await;
        let mut rows: Vec<StaffRecord> = state
            .staff
            .iter()
            .filter(|s| s.category() == category && s.center_id() == center_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let (a, b) = (a.person(), b.person());
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(rows)
    }

    async fn find_staff(
        &self,
        category: StaffCategory,
        id: StaffId,
        center_id: CenterId,
    ) -> AppResult<Option<StaffRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .staff
            .iter()
            .find(|s| s.category() == category && s.person().id == id && s.center_id() == center_id)
            .cloned())
    }
}

/// Username equality as `LOWER(a) = LOWER(b)` evaluates it.
fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemo_entity::staff::{CategoryDetails, Role};

    async fn seed_user(dir: &MemoryDirectory, username: &str) -> User {
        dir.create_user(&CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            is_superuser: false,
        })
        .await
        .unwrap()
    }

    async fn seed_center(dir: &MemoryDirectory, slug: &str, label: &str) -> Center {
        dir.create_center(&CreateCenter {
            sub_domain: slug.to_string(),
            label: label.to_string(),
            tel: None,
            mail: None,
            address: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_code_consumed_once() {
        let dir = MemoryDirectory::new();
        let user = seed_user(&dir, "amira").await;
        dir.create_verification(user.id, "123456").await.unwrap();

        assert!(dir.consume_verification_code(user.id, "000000").await.unwrap().is_none());
        let verified = dir
            .consume_verification_code(user.id, "123456")
            .await
            .unwrap()
            .unwrap();
        assert!(verified.is_verified);
        assert!(verified.verification_code.is_none());
        assert!(dir.consume_verification_code(user.id, "123456").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_accord_requires_verification() {
        let dir = MemoryDirectory::new();
        let user = seed_user(&dir, "sami").await;
        dir.create_verification(user.id, "654321").await.unwrap();

        assert!(dir.grant_admin_accord(user.id).await.unwrap().is_none());
        dir.consume_verification_code(user.id, "654321").await.unwrap();
        let state = dir.grant_admin_accord(user.id).await.unwrap().unwrap();
        assert!(state.has_role_privileges());
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let dir = MemoryDirectory::new();
        seed_center(&dir, "clinic1", "Clinic One").await;
        let err = dir
            .create_center(&CreateCenter {
                sub_domain: "clinic1".to_string(),
                label: "Other".to_string(),
                tel: None,
                mail: None,
                address: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, hemo_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_username_differing_only_in_case_conflicts() {
        let dir = MemoryDirectory::new();
        let original = seed_user(&dir, "ines").await;

        let err = dir
            .create_user(&CreateUser {
                username: "Ines".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "hash".to_string(),
                is_superuser: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, hemo_core::error::ErrorKind::Conflict);

        let found = dir.find_user_by_username("INES").await.unwrap().unwrap();
        assert_eq!(found.id, original.id);
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let dir = MemoryDirectory::new();
        let center = seed_center(&dir, "clinic1", "Clinic One").await;
        let user = seed_user(&dir, "karim").await;
        dir.create_verification(user.id, "111111").await.unwrap();
        dir.create_staff(&NewStaff {
            user_id: user.id,
            center_id: center.id,
            last_name: "Trabelsi".to_string(),
            first_name: "Karim".to_string(),
            national_id: "01234567".to_string(),
            role: Role::Technical,
            details: CategoryDetails::Technical {
                qualification: "Biomedical".to_string(),
            },
        })
        .await
        .unwrap();

        assert!(dir.delete_user(user.id).await.unwrap());
        assert!(dir.find_verification(user.id).await.unwrap().is_none());
        assert!(dir.find_staff_assignment(user.id).await.unwrap().is_none());
        assert!(!dir.delete_user(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_centers_filters_by_label() {
        let dir = MemoryDirectory::new();
        seed_center(&dir, "sfax", "Centre Sfax").await;
        seed_center(&dir, "tunis", "Centre Tunis").await;
        seed_center(&dir, "sousse", "Clinique Sousse").await;

        let page = dir
            .list_centers(Some("centre"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].sub_domain, "sfax");
    }
}
