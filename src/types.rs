//! Error types shared across the crate

use thiserror::Error;

/// Errors produced by Pathway components
#[derive(Error, Debug)]
pub enum PathwayError {
    /// Entity (user, course, or progress record) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Module id is not part of the course definition
    #[error("Module '{module_id}' is not part of course {course_id}")]
    InvalidModule { course_id: String, module_id: String },

    /// Duplicate entity (e.g. registration with an existing email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// MongoDB or other storage failure
    #[error("Database error: {0}")]
    Database(String),

    /// Bounded store operation exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Authentication/authorization failure
    #[error("Auth error: {0}")]
    Auth(String),

    /// HTTP-level failure (bad body, oversized payload)
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<std::io::Error> for PathwayError {
    fn from(e: std::io::Error) -> Self {
        PathwayError::Http(format!("IO error: {}", e))
    }
}

impl From<mongodb::error::Error> for PathwayError {
    fn from(e: mongodb::error::Error) -> Self {
        PathwayError::Database(e.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, PathwayError>;
