//! Health check endpoints

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use super::openapi::ResponseEnvelope;
use crate::{error::AppResult, response::ApiResponse, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = ResponseEnvelope)
    )
)]
pub async fn health_check() -> ApiResponse<HealthResponse> {
    ApiResponse::ok()
        .with_data(HealthResponse::new("healthy"))
        .with_message("Service is healthy")
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ResponseEnvelope),
        (status = 500, description = "Database unavailable", body = ResponseEnvelope)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> AppResult<ApiResponse<HealthResponse>> {
    state.services.catalog.ping().await?;
    Ok(ApiResponse::ok()
        .with_data(HealthResponse::new("ready"))
        .with_message("Service is ready"))
}
