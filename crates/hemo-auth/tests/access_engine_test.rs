//! Decision engine behaviour over the in-memory directory.

use std::sync::Arc;

use chrono::Utc;

use hemo_auth::directory::{AccountStore, Directory, MemoryDirectory};
use hemo_auth::rbac::{
    AccessDecisionEngine, AccessMode, AccessRequest, Decision, DenyReason, GrantBasis,
    OperationPolicy, Principal, catalog,
};
use hemo_entity::center::{Center, CreateCenter};
use hemo_entity::staff::{CategoryDetails, NewStaff, Role, StaffCategory};
use hemo_entity::user::{CreateUser, VerificationState};

struct Fixture {
    dir: MemoryDirectory,
    engine: AccessDecisionEngine,
    clinic1: Center,
    clinic2: Center,
}

impl Fixture {
    async fn new() -> Self {
        let dir = MemoryDirectory::new();
        let clinic1 = center(&dir, "clinic1").await;
        let clinic2 = center(&dir, "clinic2").await;
        let engine = AccessDecisionEngine::new(Arc::new(dir.clone()));
        Self {
            dir,
            engine,
            clinic1,
            clinic2,
        }
    }

    async fn identity(&self, username: &str, is_superuser: bool) -> Principal {
        let user = self
            .dir
            .create_user(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "unused".to_string(),
                is_superuser,
            })
            .await
            .unwrap();
        Principal {
            user_id: user.id,
            username: user.username,
            is_superuser,
        }
    }

    async fn staff(
        &self,
        username: &str,
        center: &Center,
        category: StaffCategory,
        role: Role,
    ) -> Principal {
        let principal = self.identity(username, false).await;
        self.dir
            .create_verification(principal.user_id, "123456")
            .await
            .unwrap();
        self.dir
            .consume_verification_code(principal.user_id, "123456")
            .await
            .unwrap()
            .unwrap();
        self.dir.grant_admin_accord(principal.user_id).await.unwrap().unwrap();
        self.assign(&principal, center, category, role).await;
        principal
    }

    async fn assign(
        &self,
        principal: &Principal,
        center: &Center,
        category: StaffCategory,
        role: Role,
    ) {
        self.dir
            .create_staff(&NewStaff {
                user_id: principal.user_id,
                center_id: center.id,
                last_name: "Test".to_string(),
                first_name: principal.username.clone(),
                national_id: format!("{}-{category}", principal.username),
                role,
                details: CategoryDetails::for_category(category, "n/a".to_string()),
            })
            .await
            .unwrap();
    }

    async fn decide(
        &self,
        principal: Option<&Principal>,
        tenant: Option<&Center>,
        policy: &OperationPolicy,
        mode: AccessMode,
    ) -> Decision {
        self.engine
            .decide(AccessRequest {
                principal,
                tenant,
                policy,
                mode,
            })
            .await
            .unwrap()
    }
}

async fn center(dir: &MemoryDirectory, slug: &str) -> Center {
    dir.create_center(&CreateCenter {
        sub_domain: slug.to_string(),
        label: slug.to_uppercase(),
        tel: None,
        mail: None,
        address: None,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_missing_identity_is_unauthenticated() {
    let fx = Fixture::new().await;
    let decision = fx
        .decide(None, Some(&fx.clinic1), &catalog::PATIENT_RECORDS, AccessMode::Read)
        .await;
    assert_eq!(decision.deny_reason(), Some(DenyReason::Unauthenticated));
}

#[tokio::test]
async fn test_superuser_allowed_everywhere() {
    let fx = Fixture::new().await;
    let root = fx.identity("root", true).await;

    for policy in catalog::ALL {
        for tenant in [Some(&fx.clinic1), Some(&fx.clinic2), None] {
            for mode in [AccessMode::Read, AccessMode::Write] {
                match fx.decide(Some(&root), tenant, policy, mode).await {
                    Decision::Allow(grant) => {
                        assert_eq!(grant.basis, GrantBasis::Superuser);
                        assert!(grant.context.assignment.is_none());
                    }
                    Decision::Deny(reason) => panic!("superuser denied: {reason:?}"),
                }
            }
        }
    }
}

#[tokio::test]
async fn test_no_tenant_denied_for_staff() {
    let fx = Fixture::new().await;
    let nurse = fx
        .staff("nurse", &fx.clinic1, StaffCategory::Paramedical, Role::MedicalParaStaff)
        .await;
    let decision = fx
        .decide(Some(&nurse), None, &catalog::PATIENT_RECORDS, AccessMode::Read)
        .await;
    assert_eq!(decision.deny_reason(), Some(DenyReason::NoTenant));
}

#[tokio::test]
async fn test_cross_tenant_denied_regardless_of_role() {
    let fx = Fixture::new().await;
    for (i, role) in Role::ALL.into_iter().enumerate() {
        let principal = fx
            .staff(&format!("user{i}"), &fx.clinic1, StaffCategory::Administrative, role)
            .await;
        for mode in [AccessMode::Read, AccessMode::Write] {
            let decision = fx
                .decide(Some(&principal), Some(&fx.clinic2), &catalog::PATIENT_RECORDS, mode)
                .await;
            assert_eq!(decision.deny_reason(), Some(DenyReason::CrossTenant), "{role}");
        }
    }
}

#[tokio::test]
async fn test_verification_gating() {
    let fx = Fixture::new().await;
    let combos = [(false, false), (true, false), (false, true)];

    for (i, (is_verified, admin_accord)) in combos.into_iter().enumerate() {
        let principal = fx.identity(&format!("pending{i}"), false).await;
        fx.assign(&principal, &fx.clinic1, StaffCategory::Medical, Role::LocalAdmin)
            .await;
        fx.dir
            .put_verification(VerificationState {
                user_id: principal.user_id,
                verification_code: None,
                is_verified,
                admin_accord,
                updated_at: Utc::now(),
            })
            .await;

        let decision = fx
            .decide(
                Some(&principal),
                Some(&fx.clinic1),
                &catalog::PATIENT_RECORDS,
                AccessMode::Read,
            )
            .await;
        assert_eq!(
            decision.deny_reason(),
            Some(DenyReason::RolePrivilegesWithheld),
            "verified={is_verified} accord={admin_accord}"
        );
    }
}

#[tokio::test]
async fn test_missing_verification_state() {
    let fx = Fixture::new().await;
    let principal = fx.identity("noprofile", false).await;
    fx.assign(&principal, &fx.clinic1, StaffCategory::Worker, Role::Viewer)
        .await;

    let decision = fx
        .decide(Some(&principal), Some(&fx.clinic1), &catalog::MACHINES, AccessMode::Read)
        .await;
    assert_eq!(
        decision.deny_reason(),
        Some(DenyReason::MissingVerificationState)
    );
}

#[tokio::test]
async fn test_no_staff_assignment() {
    let fx = Fixture::new().await;
    let principal = fx.identity("orphan", false).await;
    fx.dir
        .put_verification(VerificationState {
            user_id: principal.user_id,
            verification_code: None,
            is_verified: true,
            admin_accord: true,
            updated_at: Utc::now(),
        })
        .await;

    let decision = fx
        .decide(Some(&principal), Some(&fx.clinic1), &catalog::MACHINES, AccessMode::Read)
        .await;
    assert_eq!(decision.deny_reason(), Some(DenyReason::NoStaffAssignment));
}

#[tokio::test]
async fn test_local_admin_override_within_tenant_only() {
    let fx = Fixture::new().await;
    let admin = fx
        .staff("admin1", &fx.clinic1, StaffCategory::Administrative, Role::LocalAdmin)
        .await;
    let nobody_allowed = OperationPolicy::new("locked", &[]);
    let mut policies: Vec<&OperationPolicy> = catalog::ALL.iter().collect();
    policies.push(&nobody_allowed);

    for policy in policies {
        let decision = fx
            .decide(Some(&admin), Some(&fx.clinic1), policy, AccessMode::Write)
            .await;
        match decision {
            Decision::Allow(grant) => assert_eq!(grant.basis, GrantBasis::LocalAdmin),
            Decision::Deny(reason) => panic!("{} denied: {reason:?}", policy.name),
        }

        let elsewhere = fx
            .decide(Some(&admin), Some(&fx.clinic2), policy, AccessMode::Write)
            .await;
        assert_eq!(elsewhere.deny_reason(), Some(DenyReason::CrossTenant));
    }
}

#[tokio::test]
async fn test_unverified_local_admin_denied() {
    let fx = Fixture::new().await;
    let principal = fx.identity("newadmin", false).await;
    fx.dir
        .create_verification(principal.user_id, "222222")
        .await
        .unwrap();
    fx.assign(&principal, &fx.clinic1, StaffCategory::Administrative, Role::LocalAdmin)
        .await;

    let decision = fx
        .decide(
            Some(&principal),
            Some(&fx.clinic1),
            &catalog::STAFF_MANAGEMENT,
            AccessMode::Read,
        )
        .await;
    assert_eq!(
        decision.deny_reason(),
        Some(DenyReason::RolePrivilegesWithheld)
    );
}

#[tokio::test]
async fn test_read_only_role() {
    let fx = Fixture::new().await;
    let viewer = fx
        .staff("viewer", &fx.clinic1, StaffCategory::Worker, Role::Viewer)
        .await;

    let read = fx
        .decide(Some(&viewer), Some(&fx.clinic1), &catalog::MACHINES, AccessMode::Read)
        .await;
    match read {
        Decision::Allow(grant) => assert_eq!(grant.basis, GrantBasis::ReadOnlyRole),
        Decision::Deny(reason) => panic!("read denied: {reason:?}"),
    }

    let write = fx
        .decide(Some(&viewer), Some(&fx.clinic1), &catalog::MACHINES, AccessMode::Write)
        .await;
    assert_eq!(write.deny_reason(), Some(DenyReason::RoleNotPermitted));

    let no_read_only = fx
        .decide(Some(&viewer), Some(&fx.clinic1), &catalog::CONSUMABLES, AccessMode::Read)
        .await;
    assert_eq!(no_read_only.deny_reason(), Some(DenyReason::RoleNotPermitted));
}

#[tokio::test]
async fn test_allowed_role() {
    let fx = Fixture::new().await;
    let tech = fx
        .staff("tech", &fx.clinic1, StaffCategory::Technical, Role::Technical)
        .await;

    let allowed = fx
        .decide(Some(&tech), Some(&fx.clinic1), &catalog::MACHINES, AccessMode::Write)
        .await;
    match allowed {
        Decision::Allow(grant) => {
            assert_eq!(grant.basis, GrantBasis::AllowedRole);
            let assignment = grant.context.assignment.unwrap();
            assert_eq!(assignment.category, StaffCategory::Technical);
            assert_eq!(assignment.center_id, fx.clinic1.id);
        }
        Decision::Deny(reason) => panic!("technician denied: {reason:?}"),
    }

    let denied = fx
        .decide(Some(&tech), Some(&fx.clinic1), &catalog::PATIENT_RECORDS, AccessMode::Read)
        .await;
    assert_eq!(denied.deny_reason(), Some(DenyReason::RoleNotPermitted));
}

#[tokio::test]
async fn test_multiple_assignments_use_probe_order() {
    let fx = Fixture::new().await;
    let principal = fx
        .staff("double", &fx.clinic1, StaffCategory::Worker, Role::Viewer)
        .await;
    fx.assign(&principal, &fx.clinic1, StaffCategory::Medical, Role::MedicalParaStaff)
        .await;

    let decision = fx
        .decide(
            Some(&principal),
            Some(&fx.clinic1),
            &catalog::PATIENT_RECORDS,
            AccessMode::Write,
        )
        .await;
    match decision {
        Decision::Allow(grant) => {
            let assignment = grant.context.assignment.unwrap();
            assert_eq!(assignment.category, StaffCategory::Medical);
            assert_eq!(assignment.role, Role::MedicalParaStaff);
        }
        Decision::Deny(reason) => panic!("denied: {reason:?}"),
    }
}
