//! Pathway create-user - provision an account from the command line
//!
//! Skips creation when the email already exists. Initializes progress
//! for the new user (best effort, like registration).
//!
//! Environment variables:
//!   MONGO_URI, DB_NAME - target database
//!   USER_EMAIL, USER_NAME, USER_PASSWORD - account details

use clap::Parser;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathway::auth::{check_password_policy, hash_password};
use pathway::db::schemas::{UserDoc, UserRole};
use pathway::db::{MongoRepository, Repository};
use pathway::services::ProgressService;

#[derive(Parser, Debug)]
#[command(name = "pathway-create-user")]
#[command(about = "Create a Pathway user account")]
struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    mongo_uri: String,

    /// MongoDB database name
    #[arg(long, env = "DB_NAME", default_value = "pathway")]
    db_name: String,

    /// Email address for the new account
    #[arg(long, env = "USER_EMAIL", default_value = "test@example.com")]
    email: String,

    /// Display name for the new account
    #[arg(long, env = "USER_NAME", default_value = "Test User")]
    name: String,

    /// Password for the new account
    #[arg(long, env = "USER_PASSWORD", default_value = "test123456")]
    password: String,

    /// Per-operation store timeout in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value = "10000")]
    store_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(msg) = check_password_policy(&args.password) {
        error!("{}", msg);
        std::process::exit(1);
    }

    let repo = match MongoRepository::new(
        &args.mongo_uri,
        &args.db_name,
        Duration::from_millis(args.store_timeout_ms),
    )
    .await
    {
        Ok(repo) => std::sync::Arc::new(repo),
        Err(e) => {
            error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    // Idempotent: an existing account is left untouched
    match repo.user_by_email(&args.email).await {
        Ok(Some(existing)) => {
            info!(
                "User {} already exists (ID: {})",
                args.email,
                existing.id_hex()
            );
            return;
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to look up user: {}", e);
            std::process::exit(1);
        }
    }

    let password_hash = match hash_password(&args.password) {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            std::process::exit(1);
        }
    };

    let user = UserDoc::new(
        args.name.clone(),
        args.email.clone(),
        password_hash,
        UserRole::Student,
    );

    let user_id = match repo.create_user(user).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to create user: {}", e);
            std::process::exit(1);
        }
    };

    info!("User created successfully");
    info!("  Email: {}", args.email);
    info!("  Name: {}", args.name);
    info!("  ID: {}", user_id);

    let progress = ProgressService::new(repo);
    match progress.initialize_progress(&user_id).await {
        Ok(count) => info!("Progress initialized for {} courses", count),
        Err(e) => warn!("Failed to initialize progress: {}", e),
    }
}
