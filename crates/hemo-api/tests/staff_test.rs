//! Staff management and access decisions over HTTP.

mod common;

use common::{PASSWORD, ROOT, Seed, TestApp, center_host};
use hemo_auth::directory::AccountStore;
use hemo_core::types::UserId;
use hemo_entity::staff::{Role, StaffCategory};
use http::StatusCode;
use serde_json::{Value, json};

fn new_staff(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": PASSWORD,
        "last_name": "Trabelsi",
        "first_name": "Karim",
        "national_id": format!("ID{username}"),
        "detail": "Hemodialysis technician",
    })
}

async fn two_centers_with_admins(app: &TestApp) -> (String, String) {
    let clinic1 = app.seed_center("clinic1").await;
    let clinic2 = app.seed_center("clinic2").await;
    app.seed_staff(
        &clinic1,
        "admin1",
        Seed::active(StaffCategory::Administrative, Role::LocalAdmin),
    )
    .await;
    app.seed_staff(
        &clinic2,
        "admin2",
        Seed::active(StaffCategory::Administrative, Role::LocalAdmin),
    )
    .await;
    (
        app.login(&center_host("clinic1"), "admin1").await,
        app.login(&center_host("clinic2"), "admin2").await,
    )
}

#[tokio::test]
async fn test_local_admin_manages_own_center_only() {
    let app = TestApp::new();
    let (admin1, admin2) = two_centers_with_admins(&app).await;
    let host1 = center_host("clinic1");

    let created = app
        .request(
            "POST",
            Some(&host1),
            "/api/staff/technical",
            Some(new_staff("karim")),
            Some(&admin1),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["staff"]["category"], "technical");
    assert_eq!(created.body["data"]["staff"]["role"], "TECHNICAL");
    assert_eq!(created.body["data"]["is_verified"], false);

    let listed = app
        .request("GET", Some(&host1), "/api/staff/technical", None, Some(&admin1))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(1));

    // admin2's token presented on clinic1 is a cross-tenant attempt.
    let cross = app
        .request("GET", Some(&host1), "/api/staff/technical", None, Some(&admin2))
        .await;
    assert_eq!(cross.status, StatusCode::FORBIDDEN);
    assert_eq!(
        cross.body["message"],
        "You do not have permission to perform this action"
    );

    let own = app
        .request(
            "GET",
            Some(&center_host("clinic2")),
            "/api/staff/technical",
            None,
            Some(&admin2),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_username_taken_in_another_center_ignoring_case_conflicts() {
    let app = TestApp::new();
    let (_, admin2) = two_centers_with_admins(&app).await;
    let host2 = center_host("clinic2");

    for username in ["ADMIN1", "Admin1"] {
        let response = app
            .request(
                "POST",
                Some(&host2),
                "/api/staff/medical",
                Some(new_staff(username)),
                Some(&admin2),
            )
            .await;
        assert_eq!(response.status, StatusCode::CONFLICT, "{username}");
        assert_eq!(response.body["error"], "CONFLICT");
    }

    let listed = app
        .request("GET", Some(&host2), "/api/staff/medical", None, Some(&admin2))
        .await;
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(0));

    // clinic1's admin keeps logging in under the original spelling.
    app.login(&center_host("clinic1"), "admin1").await;
}

#[tokio::test]
async fn test_staff_routes_require_identity_tenant_and_role() {
    let app = TestApp::new();
    let clinic = app.seed_center("clinic1").await;
    let host = center_host("clinic1");
    app.seed_staff(
        &clinic,
        "submitter",
        Seed::active(StaffCategory::Worker, Role::Submitter),
    )
    .await;
    app.seed_staff(
        &clinic,
        "admin",
        Seed::active(StaffCategory::Administrative, Role::LocalAdmin),
    )
    .await;

    let anonymous = app
        .request("GET", Some(&host), "/api/staff/worker", None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let submitter = app.login(&host, "submitter").await;
    let denied = app
        .request("GET", Some(&host), "/api/staff/worker", None, Some(&submitter))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let admin = app.login(&host, "admin").await;
    let no_tenant = app
        .request("GET", Some(ROOT), "/api/staff/worker", None, Some(&admin))
        .await;
    assert_eq!(no_tenant.status, StatusCode::FORBIDDEN);

    let unknown_category = app
        .request("GET", Some(&host), "/api/staff/surgeons", None, Some(&admin))
        .await;
    assert_eq!(unknown_category.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unapproved_local_admin_is_denied() {
    let app = TestApp::new();
    let clinic = app.seed_center("clinic1").await;
    let host = center_host("clinic1");
    app.seed_staff(
        &clinic,
        "pending",
        Seed {
            category: StaffCategory::Administrative,
            role: Role::LocalAdmin,
            verified: true,
            accord: false,
        },
    )
    .await;

    let token = app.login(&host, "pending").await;
    let response = app
        .request("GET", Some(&host), "/api/staff/medical", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_superuser_manages_any_center() {
    let app = TestApp::new();
    app.seed_center("clinic1").await;
    app.seed_superuser("root").await;
    let token = app.login(ROOT, "root").await;

    let listed = app
        .request(
            "GET",
            Some(&center_host("clinic1")),
            "/api/staff/medical",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);

    // Allowed by the engine, but the operation itself needs a center.
    let on_root = app
        .request("GET", Some(ROOT), "/api/staff/medical", None, Some(&token))
        .await;
    assert_eq!(on_root.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_is_tenant_filtered_and_removes_identity() {
    let app = TestApp::new();
    let (admin1, admin2) = two_centers_with_admins(&app).await;
    let host1 = center_host("clinic1");

    let created = app
        .request(
            "POST",
            Some(&host1),
            "/api/staff/worker",
            Some(new_staff("sami")),
            Some(&admin1),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let staff_id = created.body["data"]["staff"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/staff/worker/{staff_id}");

    let from_other = app
        .request("DELETE", Some(&center_host("clinic2")), &path, None, Some(&admin2))
        .await;
    assert_eq!(from_other.status, StatusCode::NOT_FOUND);

    let deleted = app
        .request("DELETE", Some(&host1), &path, None, Some(&admin1))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(app.store.find_user_by_username("sami").await.unwrap().is_none());

    let again = app
        .request("DELETE", Some(&host1), &path, None, Some(&admin1))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_accord_after_verification_unlocks_role() {
    let app = TestApp::new();
    let (admin1, admin2) = two_centers_with_admins(&app).await;
    let host1 = center_host("clinic1");

    let created = app
        .request(
            "POST",
            Some(&host1),
            "/api/staff/medical",
            Some(new_staff("dr_ali")),
            Some(&admin1),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let user_id = created.body["data"]["staff"]["user_id"].clone();

    let check = json!({ "operation": "patient_records", "method": "POST" });

    let early = app
        .request(
            "POST",
            Some(&host1),
            "/api/staff/accord",
            Some(json!({ "user_id": user_id })),
            Some(&admin1),
        )
        .await;
    assert_eq!(early.status, StatusCode::BAD_REQUEST);

    let code = app.notifier.last_code_for("dr_ali").await;
    let verified = app
        .request(
            "POST",
            Some(&host1),
            "/api/auth/verify",
            Some(json!({ "user_id": user_id, "code": code })),
            None,
        )
        .await;
    assert_eq!(verified.status, StatusCode::OK);

    let doctor = app.login(&host1, "dr_ali").await;
    let before = app
        .request("POST", Some(&host1), "/api/access/check", Some(check.clone()), Some(&doctor))
        .await;
    assert_eq!(before.body["data"]["allowed"], false);

    let foreign = app
        .request(
            "POST",
            Some(&center_host("clinic2")),
            "/api/staff/accord",
            Some(json!({ "user_id": user_id })),
            Some(&admin2),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let granted = app
        .request(
            "POST",
            Some(&host1),
            "/api/staff/accord",
            Some(json!({ "user_id": user_id })),
            Some(&admin1),
        )
        .await;
    assert_eq!(granted.status, StatusCode::OK);
    assert_eq!(granted.body["data"]["admin_accord"], true);

    let after = app
        .request("POST", Some(&host1), "/api/access/check", Some(check), Some(&doctor))
        .await;
    assert_eq!(after.body["data"]["allowed"], true);

    let me = app
        .request("GET", Some(&host1), "/api/me", None, Some(&doctor))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["eligibility"], "FULLY_AUTHORIZED");
    assert_eq!(me.body["data"]["center"]["sub_domain"], "clinic1");
    assert_eq!(me.body["data"]["role"], "MEDICAL_PARA_STAFF");
}

#[tokio::test]
async fn test_read_only_role_reads_but_cannot_write() {
    let app = TestApp::new();
    let clinic = app.seed_center("clinic1").await;
    let host = center_host("clinic1");
    app.seed_staff(
        &clinic,
        "viewer",
        Seed::active(StaffCategory::Administrative, Role::Viewer),
    )
    .await;
    let token = app.login(&host, "viewer").await;

    for (method, allowed) in [("GET", true), ("POST", false), ("DELETE", false)] {
        let response = app
            .request(
                "POST",
                Some(&host),
                "/api/access/check",
                Some(json!({ "operation": "hemodialysis_sessions", "method": method })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["allowed"], allowed, "{method}");
    }

    let unknown = app
        .request(
            "POST",
            Some(&host),
            "/api/access/check",
            Some(json!({ "operation": "teleportation" })),
            Some(&token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_center_management_is_superuser_only() {
    let app = TestApp::new();
    let (admin1, _) = two_centers_with_admins(&app).await;
    let root_id: UserId = app.seed_superuser("root").await;
    let root = app.login(ROOT, "root").await;

    let body = json!({
        "sub_domain": "Sousse Nord",
        "label": "Centre Sousse Nord",
        "mail": "contact@sousse.tn",
    });

    let forbidden = app
        .request("POST", Some(ROOT), "/api/centers", Some(body.clone()), Some(&admin1))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let created = app
        .request("POST", Some(ROOT), "/api/centers", Some(body.clone()), Some(&root))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["sub_domain"], "sousse-nord");

    let duplicate = app
        .request("POST", Some(ROOT), "/api/centers", Some(body), Some(&root))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let page = app
        .request("GET", Some(ROOT), "/api/centers?label=sousse", None, Some(&root))
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["data"]["total_items"], 1);

    let resolved = app
        .request("GET", Some("sousse-nord.cimssante.com"), "/api/health", None, None)
        .await;
    assert_eq!(resolved.status, StatusCode::OK);

    let me = app.request("GET", Some(ROOT), "/api/me", None, Some(&root)).await;
    assert_eq!(me.body["data"]["user_id"], json!(root_id));
    assert_eq!(me.body["data"]["is_superuser"], true);
}

#[tokio::test]
async fn test_policy_catalog_is_listed() {
    let app = TestApp::new();

    let response = app.request("GET", Some(ROOT), "/api/policies", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(names.contains(&"staff_management"));
    assert!(names.contains(&"machines"));
}
