//! HTTP routes for authentication
//!
//! - POST /api/auth/register - Create an account, returns a JWT token
//! - POST /api/auth/login    - Authenticate and get a JWT token
//! - GET  /api/user/me       - Current user info from token

use hyper::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{check_password_policy, hash_password, verify_password, JwtValidator};
use crate::db::schemas::{UserDoc, UserRole};
use crate::routes::{
    authenticate, error_response, json_response, parse_json_body, BoxBody, ErrorResponse,
};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User as it appears on the wire (no password hash)
#[derive(Debug, Serialize)]
pub struct UserJson {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<UserDoc> for UserJson {
    fn from(user: UserDoc) -> Self {
        Self {
            id: user.id_hex(),
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserJson,
}

/// Handle auth-related HTTP requests.
///
/// Returns Some(response) if the request was handled, None if it is not
/// an auth route.
pub async fn handle_auth_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let path = req.uri().path();
    let method = req.method();

    let response = match (method, path) {
        (&Method::POST, "/api/auth/register") => handle_register(req, state).await,
        (&Method::POST, "/api/auth/login") => handle_login(req, state).await,
        (&Method::GET, "/api/user/me") => handle_me(req, state).await,

        (_, "/api/auth/register") | (_, "/api/auth/login") | (_, "/api/user/me") => {
            json_response(
                StatusCode::METHOD_NOT_ALLOWED,
                &ErrorResponse {
                    error: "Method not allowed".into(),
                },
            )
        }

        _ => return None,
    };

    Some(response)
}

/// POST /api/auth/register
///
/// Flow:
/// 1. Validate fields, reject duplicate emails
/// 2. Hash the password with argon2
/// 3. Store the user, initialize their progress (best effort)
/// 4. Return a JWT token with the new user
async fn handle_register(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: RegisterRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.name.is_empty() || body.email.is_empty() || !body.email.contains('@') {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ErrorResponse {
                error: "Missing required fields: name, email, password".into(),
            },
        );
    }

    if let Err(msg) = check_password_policy(&body.password) {
        return json_response(StatusCode::BAD_REQUEST, &ErrorResponse { error: msg });
    }

    match state.repo.user_by_email(&body.email).await {
        Ok(Some(_)) => {
            return json_response(
                StatusCode::CONFLICT,
                &ErrorResponse {
                    error: "User with this email already exists".into(),
                },
            )
        }
        Ok(None) => {}
        Err(e) => return error_response(&e),
    }

    let password_hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => return error_response(&e),
    };

    let user = UserDoc::new(body.name, body.email.clone(), password_hash, UserRole::Student);
    let user_id = match state.repo.create_user(user).await {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    // Progress can also be initialized lazily on first dashboard load,
    // so a failure here must not fail registration.
    if let Err(e) = state.progress.initialize_progress(&user_id).await {
        warn!(%user_id, error = %e, "failed to initialize progress at registration");
    }

    let user = match state.repo.user_by_id(&user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorResponse {
                    error: "User not visible after insert".into(),
                },
            )
        }
        Err(e) => return error_response(&e),
    };

    info!(email = %body.email, %user_id, "user registered");
    generate_auth_response(&state, user, StatusCode::CREATED)
}

/// POST /api/auth/login
async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: LoginRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.email.is_empty() || body.password.is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ErrorResponse {
                error: "Missing required fields: email, password".into(),
            },
        );
    }

    let user = match state.repo.user_by_email(&body.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %body.email, "login failed - user not found");
            // Generic error to prevent user enumeration
            return invalid_credentials();
        }
        Err(e) => return error_response(&e),
    };

    let password_valid = match verify_password(&body.password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            warn!(email = %body.email, error = %e, "password verification error");
            return error_response(&e);
        }
    };

    if !password_valid {
        warn!(email = %body.email, "login failed - invalid password");
        return invalid_credentials();
    }

    info!(email = %body.email, "login successful");
    generate_auth_response(&state, user, StatusCode::OK)
}

/// GET /api/user/me
async fn handle_me(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let claims = match authenticate(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match state.repo.user_by_id(&claims.sub).await {
        Ok(Some(user)) => json_response(StatusCode::OK, &UserJson::from(user)),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            &ErrorResponse {
                error: "User not found".into(),
            },
        ),
        Err(e) => error_response(&e),
    }
}

fn invalid_credentials() -> Response<BoxBody> {
    json_response(
        StatusCode::UNAUTHORIZED,
        &ErrorResponse {
            error: "Invalid email or password".into(),
        },
    )
}

/// Generate a successful auth response with JWT token
fn generate_auth_response(
    state: &AppState,
    user: UserDoc,
    status: StatusCode,
) -> Response<BoxBody> {
    let jwt = JwtValidator::new(&state.args.jwt_secret(), state.args.jwt_expiry_seconds);

    match jwt.generate_token(&user) {
        Ok(token) => json_response(
            status,
            &AuthResponse {
                token,
                user: UserJson::from(user),
            },
        ),
        Err(e) => error_response(&e),
    }
}
