//! Health check handlers.

use axum::Json;

use hemo_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
