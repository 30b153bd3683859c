//! Admin seed endpoint
//!
//! POST /api/admin/seed reloads the whole course catalog. Guarded by a
//! shared-secret header so it can't be triggered accidentally:
//!
//! - Set ADMIN_SEED_TOKEN on the backend service
//! - Call with header X-Admin-Seed-Token: <token>
//!
//! When ADMIN_SEED_TOKEN is unset the endpoint answers 404, hiding it
//! entirely.

use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::routes::{error_response, json_response, BoxBody, ErrorResponse};
use crate::seed::seed_courses;
use crate::server::AppState;

#[derive(Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub courses: usize,
    pub seeded_at: String,
}

/// POST /api/admin/seed
pub async fn handle_admin_seed(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let Some(ref expected) = state.args.admin_seed_token else {
        return json_response(
            StatusCode::NOT_FOUND,
            &ErrorResponse {
                error: "Not found".into(),
            },
        );
    };

    let provided = req
        .headers()
        .get("X-Admin-Seed-Token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if provided.is_empty() || provided != expected {
        warn!("admin seed rejected - bad or missing token");
        return json_response(
            StatusCode::FORBIDDEN,
            &ErrorResponse {
                error: "Forbidden".into(),
            },
        );
    }

    match seed_courses(state.repo.as_ref()).await {
        Ok(courses) => {
            info!(courses, "course catalog reseeded via admin endpoint");
            json_response(
                StatusCode::OK,
                &SeedResponse {
                    message: "Courses seeded successfully",
                    courses,
                    seeded_at: chrono::Utc::now().to_rfc3339(),
                },
            )
        }
        Err(e) => error_response(&e),
    }
}
