//! HTTP server implementation
//!
//! hyper http1 with TokioIo and manual method/path routing. CORS headers
//! are applied in one place, after routing, from the configured origin.

use hyper::body::Incoming;
use hyper::header::HeaderValue;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::db::Repository;
use crate::routes::{self, empty_body, json_response, BoxBody, ErrorResponse};
use crate::services::ProgressService;
use crate::types::PathwayError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub repo: Arc<dyn Repository>,
    pub progress: ProgressService,
}

impl AppState {
    /// Create application state over an injected repository
    pub fn new(args: Args, repo: Arc<dyn Repository>) -> Self {
        let progress = ProgressService::new(Arc::clone(&repo));
        Self {
            args,
            repo,
            progress,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), PathwayError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Pathway listening on {}", state.args.listen);

    if state.args.dev_mode {
        warn!("Development mode enabled");
    }
    if state.args.admin_seed_token.is_none() {
        info!("ADMIN_SEED_TOKEN not set - seed endpoint hidden");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let allowed_origins = state.args.allowed_origins.clone();

    // CORS preflight
    if method == Method::OPTIONS {
        return Ok(with_cors(preflight_response(), &allowed_origins));
    }

    // Auth routes consume the request
    if path.starts_with("/api/auth") || path == "/api/user/me" {
        if let Some(response) = routes::handle_auth_request(req, Arc::clone(&state)).await {
            return Ok(with_cors(response, &allowed_origins));
        }
        return Ok(with_cors(not_found_response(&path), &allowed_origins));
    }

    let response = match (method, path.as_str()) {
        // Liveness probe
        (Method::GET, "/api/health") => routes::health_check(),

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // Course catalog
        (Method::GET, "/api/courses") => routes::handle_list_courses(Arc::clone(&state)).await,
        (Method::GET, p) if p.starts_with("/api/courses/") => {
            let course_id = p.strip_prefix("/api/courses/").unwrap_or("");
            routes::handle_course_by_id(Arc::clone(&state), course_id).await
        }

        // Progress (authenticated)
        (Method::GET, "/api/user/progress") => {
            routes::handle_user_progress(req, Arc::clone(&state)).await
        }
        (Method::POST, "/api/user/progress/complete") => {
            routes::handle_complete_module(req, Arc::clone(&state)).await
        }

        // Admin catalog reseed (shared-secret header)
        (Method::POST, "/api/admin/seed") => {
            routes::handle_admin_seed(req, Arc::clone(&state)).await
        }

        // Not found
        _ => not_found_response(&path),
    };

    Ok(with_cors(response, &allowed_origins))
}

/// Apply CORS headers to a response
fn with_cors(mut response: Response<BoxBody>, allowed_origins: &str) -> Response<BoxBody> {
    let headers = response.headers_mut();

    if let Ok(origin) = HeaderValue::from_str(allowed_origins) {
        headers.insert("Access-Control-Allow-Origin", origin);
    }
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type, Authorization, X-Admin-Seed-Token"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );

    response
}

/// CORS preflight response
fn preflight_response() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<BoxBody> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorResponse {
            error: format!("Not Found: {}", path),
        },
    )
}
