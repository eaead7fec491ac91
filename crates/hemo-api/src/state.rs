//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hemo_auth::directory::{AccountStore, Directory};
use hemo_auth::jwt::{JwtDecoder, JwtEncoder};
use hemo_auth::password::{PasswordHasher, PasswordPolicy};
use hemo_auth::rbac::AccessDecisionEngine;
use hemo_auth::tenant::TenantResolver;
use hemo_core::config::AppConfig;
use hemo_core::traits::VerificationNotifier;
use hemo_service::{
    CenterService, LoginService, ProfileService, StaffOnboarding, StaffService,
    VerificationService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Tenancy & access ─────────────────────────────────────
    /// Host-to-center resolver
    pub tenant_resolver: Arc<TenantResolver>,
    /// Access decision engine
    pub access_engine: Arc<AccessDecisionEngine>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Center management
    pub center_service: Arc<CenterService>,
    /// Staff management
    pub staff_service: Arc<StaffService>,
    /// E-mail verification
    pub verification_service: Arc<VerificationService>,
    /// Login and token refresh
    pub login_service: Arc<LoginService>,
    /// Caller profile
    pub profile_service: Arc<ProfileService>,
}

impl AppState {
    /// Wire every component over one store.
    pub fn new<S>(
        config: AppConfig,
        store: Arc<S>,
        notifier: Arc<dyn VerificationNotifier>,
    ) -> Self
    where
        S: AccountStore + 'static,
    {
        let directory: Arc<dyn Directory> = store.clone();
        let store: Arc<dyn AccountStore> = store;

        let code_length = config.verification.code_length;
        let hasher = PasswordHasher::new();

        let onboarding = StaffOnboarding::new(
            Arc::clone(&store),
            hasher.clone(),
            PasswordPolicy::new(&config.auth),
            Arc::clone(&notifier),
            code_length,
        );

        Self {
            tenant_resolver: Arc::new(TenantResolver::new(
                config.tenancy.clone(),
                Arc::clone(&directory),
            )),
            access_engine: Arc::new(AccessDecisionEngine::new(directory)),
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            center_service: Arc::new(CenterService::new(
                Arc::clone(&store),
                config.tenancy.clone(),
            )),
            staff_service: Arc::new(StaffService::new(Arc::clone(&store), onboarding)),
            verification_service: Arc::new(VerificationService::new(
                Arc::clone(&store),
                notifier,
                code_length,
            )),
            login_service: Arc::new(LoginService::new(
                Arc::clone(&store),
                hasher,
                JwtEncoder::new(&config.auth),
            )),
            profile_service: Arc::new(ProfileService::new(store)),
            config: Arc::new(config),
        }
    }
}
