//! Pathway migrate - move a user and their progress between database
//! instances (e.g. dev to production)
//!
//! Same transfer logic as copy-to-dev, but both URIs are required and
//! the target defaults to the production database name.
//!
//! Environment variables:
//!   SOURCE_MONGO_URI, SOURCE_DB_NAME - source database
//!   TARGET_MONGO_URI, TARGET_DB_NAME - target database
//!   USER_EMAIL - user to migrate

use clap::Parser;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathway::db::MongoRepository;
use pathway::services::copy_user_and_progress;

#[derive(Parser, Debug)]
#[command(name = "pathway-migrate")]
#[command(about = "Migrate a user and their progress between databases")]
struct Args {
    /// Source MongoDB URI
    #[arg(long, env = "SOURCE_MONGO_URI")]
    source_mongo_uri: String,

    /// Source database name
    #[arg(long, env = "SOURCE_DB_NAME", default_value = "pathway")]
    source_db_name: String,

    /// Target MongoDB URI
    #[arg(long, env = "TARGET_MONGO_URI")]
    target_mongo_uri: String,

    /// Target database name
    #[arg(long, env = "TARGET_DB_NAME", default_value = "pathway")]
    target_db_name: String,

    /// Email of the user to migrate
    #[arg(long, env = "USER_EMAIL", default_value = "test@example.com")]
    email: String,

    /// Per-operation store timeout in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value = "30000")]
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
    let timeout = Duration::from_millis(args.store_timeout_ms);

    info!("Connecting to source database...");
    let source = match MongoRepository::new(&args.source_mongo_uri, &args.source_db_name, timeout)
        .await
    {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to connect to source MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    info!("Connecting to target database...");
    let target = match MongoRepository::new(&args.target_mongo_uri, &args.target_db_name, timeout)
        .await
    {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to connect to target MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    match copy_user_and_progress(&source, &target, &args.email).await {
        Ok(summary) => {
            info!(
                "Migration completed (user_id: {}, created: {}, mapped courses: {}, copied: {}, skipped: {})",
                summary.target_user_id,
                summary.user_created,
                summary.mapped_courses,
                summary.copied,
                summary.skipped
            );
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            std::process::exit(1);
        }
    }
}
