//! Pathway - learning platform backend
//!
//! Serves the course catalog, user accounts, and per-user progress tracking
//! over HTTP, backed by MongoDB.
//!
//! ## Services
//!
//! - **Courses**: read-only catalog of seeded courses
//! - **Auth**: registration and login with JWT tokens
//! - **Progress**: per-user, per-course module completion tracking
//! - **Transfer**: cross-environment user/progress migration for the CLIs

pub mod auth;
pub mod config;
pub mod db;
pub mod routes;
pub mod seed;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{PathwayError, Result};
