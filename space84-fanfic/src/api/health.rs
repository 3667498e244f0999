//! Static service endpoints: welcome, health check and service descriptor

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

pub const SERVICE_NAME: &str = "Space84 StudyCafe";
pub const SERVICE_DESCRIPTION: &str = "스터디카페 관리 시스템";

/// Welcome response
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Service descriptor response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// GET /
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to {}", SERVICE_NAME),
    })
}

/// GET /api/health
///
/// Health check endpoint for monitoring. Never touches the backing store.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// GET /api/info
pub async fn service_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
    })
}

/// Build static routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/api/health", get(health_check))
        .route("/api/info", get(service_info))
}
