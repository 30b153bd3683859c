//! HTTP routes for Pathway

pub mod auth_routes;
pub mod courses;
pub mod health;
pub mod progress;
pub mod seed;

pub use auth_routes::handle_auth_request;
pub use courses::{handle_course_by_id, handle_list_courses};
pub use health::{health_check, version_info};
pub use progress::{handle_complete_module, handle_user_progress};
pub use seed::handle_admin_seed;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{extract_token_from_header, Claims, JwtValidator};
use crate::server::AppState;
use crate::types::{PathwayError, Result};

pub(crate) type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Standard error payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub(crate) fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

/// Serialize a body to a JSON response
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(full_body(json))
        .unwrap()
}

/// Map an error to its HTTP status and standard payload
pub(crate) fn error_response(err: &PathwayError) -> Response<BoxBody> {
    let status = match err {
        PathwayError::NotFound(_) => StatusCode::NOT_FOUND,
        PathwayError::InvalidModule { .. } | PathwayError::Http(_) => StatusCode::BAD_REQUEST,
        PathwayError::Conflict(_) => StatusCode::CONFLICT,
        PathwayError::Auth(_) => StatusCode::UNAUTHORIZED,
        PathwayError::Database(_) | PathwayError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    json_response(
        status,
        &ErrorResponse {
            error: err.to_string(),
        },
    )
}

/// Read and deserialize a JSON request body (bounded size)
pub(crate) async fn parse_json_body<T: for<'de> Deserialize<'de>>(
    req: Request<hyper::body::Incoming>,
) -> Result<T> {
    let body = req
        .collect()
        .await
        .map_err(|e| PathwayError::Http(format!("Failed to read body: {}", e)))?;

    let bytes = body.to_bytes();
    if bytes.len() > 65536 {
        return Err(PathwayError::Http("Request body too large".into()));
    }

    serde_json::from_slice(&bytes).map_err(|e| PathwayError::Http(format!("Invalid JSON: {}", e)))
}

/// Authenticate a request from its bearer token
///
/// Returns the verified claims, or the 401 response to send back.
pub(crate) fn authenticate(
    req: &Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> std::result::Result<Claims, Response<BoxBody>> {
    let header = req
        .headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = header.and_then(extract_token_from_header).ok_or_else(|| {
        json_response(
            StatusCode::UNAUTHORIZED,
            &ErrorResponse {
                error: "Missing or malformed Authorization header".into(),
            },
        )
    })?;

    let jwt = JwtValidator::new(&state.args.jwt_secret(), state.args.jwt_expiry_seconds);
    jwt.verify_token(token).map_err(|e| {
        json_response(
            StatusCode::UNAUTHORIZED,
            &ErrorResponse {
                error: e.to_string(),
            },
        )
    })
}
