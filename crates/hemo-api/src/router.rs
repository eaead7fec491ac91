//! Route definitions for the HTTP API.
//!
//! All routes are mounted under `/api`. The tenant middleware wraps the
//! whole router so that every handler sees the resolved center.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and the tenant middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(center_routes())
        .merge(staff_routes())
        .merge(policy_routes())
        .route("/me", get(handlers::profile::me))
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::health::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::tenant::resolve_tenant,
        ))
        .with_state(state)
}

/// Login, refresh, and verification
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/resend", post(handlers::auth::resend))
}

/// Center management (superuser) and subdomain lookup
fn center_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/centers",
            get(handlers::center::list_centers).post(handlers::center::create_center),
        )
        .route("/centers/check", get(handlers::center::check_subdomain))
}

/// Staff management within the resolved center
fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/staff/accord", post(handlers::staff::grant_accord))
        .route(
            "/staff/{category}",
            get(handlers::staff::list_staff).post(handlers::staff::create_staff),
        )
        .route(
            "/staff/{category}/{id}",
            delete(handlers::staff::delete_staff),
        )
}

/// Operation catalog and access checks
fn policy_routes() -> Router<AppState> {
    Router::new()
        .route("/policies", get(handlers::policy::list_policies))
        .route("/access/check", post(handlers::policy::check_access))
}
