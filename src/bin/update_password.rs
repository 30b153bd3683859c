//! Pathway update-password - reset an account's password
//!
//! Environment variables:
//!   MONGO_URI, DB_NAME - target database
//!   USER_EMAIL, USER_PASSWORD - account and new password

use clap::Parser;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathway::auth::{check_password_policy, hash_password};
use pathway::db::{MongoRepository, Repository};

#[derive(Parser, Debug)]
#[command(name = "pathway-update-password")]
#[command(about = "Reset a Pathway user's password")]
struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGO_URI")]
    mongo_uri: String,

    /// MongoDB database name
    #[arg(long, env = "DB_NAME", default_value = "pathway")]
    db_name: String,

    /// Email of the account to update
    #[arg(long, env = "USER_EMAIL", default_value = "test@example.com")]
    email: String,

    /// New password
    #[arg(long, env = "USER_PASSWORD")]
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
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let user = match repo.user_by_email(&args.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            error!("User {} not found", args.email);
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to get user: {}", e);
            std::process::exit(1);
        }
    };

    let password_hash = match hash_password(&args.password) {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = repo
        .update_user_password(&user.id_hex(), &password_hash)
        .await
    {
        error!("Failed to update password: {}", e);
        std::process::exit(1);
    }

    info!("Password updated successfully");
    info!("  Email: {}", args.email);
}
