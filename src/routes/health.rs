//! Health and version endpoints

use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::routes::{json_response, BoxBody};

/// Liveness payload
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Handle liveness probe (GET /api/health)
pub fn health_check() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "ok",
            message: "Pathway backend is running",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
    )
}

/// Version information for deployment verification
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_time: &'static str,
    pub service: &'static str,
}

/// Handle version endpoint (GET /version)
pub fn version_info() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &VersionResponse {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
            build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
            service: "pathway-backend",
        },
    )
}
