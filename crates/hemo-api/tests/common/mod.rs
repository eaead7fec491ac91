//! Shared helpers for HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use hemo_api::{AppState, build_app};
use hemo_auth::directory::{AccountStore, MemoryDirectory};
use hemo_auth::password::PasswordHasher;
use hemo_core::config::AppConfig;
use hemo_core::result::AppResult;
use hemo_core::traits::VerificationNotifier;
use hemo_core::types::UserId;
use hemo_entity::center::{Center, CreateCenter};
use hemo_entity::staff::{CategoryDetails, NewStaff, Role, StaffCategory};
use hemo_entity::user::{CreateUser, VerificationState};

/// Root domain used by every test.
pub const ROOT: &str = "cimssante.com";

/// Password of every seeded account.
pub const PASSWORD: &str = "renal-care-42";

/// Captures delivered verification codes.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Last code delivered to `username`.
    pub async fn last_code_for(&self, username: &str) -> String {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(u, _)| u == username)
            .map(|(_, c)| c.clone())
            .expect("no code delivered")
    }
}

#[async_trait]
impl VerificationNotifier for RecordingNotifier {
    async fn send_verification_code(
        &self,
        username: &str,
        _email: &str,
        code: &str,
    ) -> AppResult<()> {
        self.sent
            .lock()
            .await
            .push((username.to_string(), code.to_string()));
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for seeding and assertions
    pub store: Arc<MemoryDirectory>,
    /// Captured verification codes
    pub notifier: Arc<RecordingNotifier>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Account state of a seeded staff member.
#[derive(Debug, Clone, Copy)]
pub struct Seed {
    pub category: StaffCategory,
    pub role: Role,
    pub verified: bool,
    pub accord: bool,
}

impl Seed {
    /// Verified and approved member with `role`.
    pub fn active(category: StaffCategory, role: Role) -> Self {
        Self {
            category,
            role,
            verified: true,
            accord: true,
        }
    }
}

/// `slug.cimssante.com`
pub fn center_host(slug: &str) -> String {
    format!("{slug}.{ROOT}")
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "url": "postgres://unused/hemo" },
            "tenancy": { "root_domain": ROOT },
        }))
        .expect("test config");

        let store = Arc::new(MemoryDirectory::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState::new(config.clone(), Arc::clone(&store), notifier.clone());

        Self {
            router: build_app(state, &config.server.cors),
            store,
            notifier,
        }
    }

    /// Insert a center
    pub async fn seed_center(&self, slug: &str) -> Center {
        self.store
            .create_center(&CreateCenter {
                sub_domain: slug.to_string(),
                label: format!("Centre {slug}"),
                tel: None,
                mail: None,
                address: None,
            })
            .await
            .expect("seed center")
    }

    /// Insert a superuser
    pub async fn seed_superuser(&self, username: &str) -> UserId {
        self.store
            .create_user(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                password_hash: PasswordHasher::new().hash(PASSWORD).expect("hash"),
                is_superuser: true,
            })
            .await
            .expect("seed superuser")
            .id
    }

    /// Insert a staff member of `center` in the given account state
    pub async fn seed_staff(&self, center: &Center, username: &str, seed: Seed) -> UserId {
        let user = self
            .store
            .create_user(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                password_hash: PasswordHasher::new().hash(PASSWORD).expect("hash"),
                is_superuser: false,
            })
            .await
            .expect("seed user");

        self.store
            .create_verification(user.id, "000000")
            .await
            .expect("seed profile");
        self.store
            .create_staff(&NewStaff {
                user_id: user.id,
                center_id: center.id,
                last_name: "Test".to_string(),
                first_name: username.to_string(),
                national_id: format!("NID-{username}"),
                role: seed.role,
                details: CategoryDetails::for_category(seed.category, "Seeded".to_string()),
            })
            .await
            .expect("seed staff");
        self.store
            .put_verification(VerificationState {
                user_id: user.id,
                verification_code: (!seed.verified).then(|| "000000".to_string()),
                is_verified: seed.verified,
                admin_accord: seed.accord,
                updated_at: chrono::Utc::now(),
            })
            .await;

        user.id
    }

    /// Log in on `host` and return the access token
    pub async fn login(&self, host: &str, username: &str) -> String {
        let response = self
            .request(
                "POST",
                Some(host),
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        host: Option<&str>,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(host) = host {
            req = req.header("Host", host);
        }
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let body = body
            .map(|b| Body::from(serde_json::to_vec(&b).expect("serialize body")))
            .unwrap_or_else(Body::empty);
        let req = req.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
