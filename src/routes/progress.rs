//! Progress endpoints (authenticated)
//!
//! - GET  /api/user/progress          - all courses joined with progress
//! - POST /api/user/progress/complete - mark one module complete

use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::routes::courses::CourseJson;
use crate::routes::{
    authenticate, error_response, json_response, parse_json_body, BoxBody, ErrorResponse,
};
use crate::server::AppState;
use crate::services::CourseProgressView;

/// Aggregated view as it appears on the wire
#[derive(Serialize)]
pub struct ProgressViewJson {
    pub course: CourseJson,
    pub completed_modules: Vec<String>,
    pub is_completed: bool,
    pub progress_percent: f64,
}

impl From<CourseProgressView> for ProgressViewJson {
    fn from(view: CourseProgressView) -> Self {
        Self {
            course: CourseJson::from(view.course),
            completed_modules: view.completed_modules,
            is_completed: view.is_completed,
            progress_percent: view.progress_percent,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteModuleRequest {
    pub course_id: String,
    pub module_id: String,
}

#[derive(Debug, Serialize)]
pub struct CompleteModuleResponse {
    pub message: &'static str,
    pub course_id: String,
    pub module_id: String,
}

/// GET /api/user/progress
pub async fn handle_user_progress(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let claims = match authenticate(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match state.progress.course_progress(&claims.sub).await {
        Ok(views) => {
            let body: Vec<ProgressViewJson> =
                views.into_iter().map(ProgressViewJson::from).collect();
            json_response(StatusCode::OK, &body)
        }
        Err(e) => error_response(&e),
    }
}

/// POST /api/user/progress/complete
pub async fn handle_complete_module(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let claims = match authenticate(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let body: CompleteModuleRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.course_id.is_empty() || body.module_id.is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ErrorResponse {
                error: "Missing required fields: course_id, module_id".into(),
            },
        );
    }

    match state
        .progress
        .mark_module_complete(&claims.sub, &body.course_id, &body.module_id)
        .await
    {
        Ok(()) => json_response(
            StatusCode::OK,
            &CompleteModuleResponse {
                message: "Module marked as complete",
                course_id: body.course_id,
                module_id: body.module_id,
            },
        ),
        Err(e) => error_response(&e),
    }
}
