//! Pathway copy-to-dev - copy a user and their progress from the
//! production database into a dev database
//!
//! Course ids differ between databases, so progress records are remapped
//! by course title. Safe to re-run: existing target progress for the
//! user is replaced, never duplicated.
//!
//! Environment variables:
//!   SOURCE_MONGO_URI, SOURCE_DB_NAME - production database (source)
//!   TARGET_MONGO_URI, TARGET_DB_NAME - dev database (target; URI
//!     defaults to the source URI, name defaults to pathway-dev)
//!   USER_EMAIL - user to copy

use clap::Parser;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathway::db::MongoRepository;
use pathway::services::copy_user_and_progress;

#[derive(Parser, Debug)]
#[command(name = "pathway-copy-to-dev")]
#[command(about = "Copy a user and their progress into the dev database")]
struct Args {
    /// Source (production) MongoDB URI
    #[arg(long, env = "SOURCE_MONGO_URI")]
    source_mongo_uri: String,

    /// Source database name
    #[arg(long, env = "SOURCE_DB_NAME", default_value = "pathway")]
    source_db_name: String,

    /// Target (dev) MongoDB URI; defaults to the source URI
    #[arg(long, env = "TARGET_MONGO_URI")]
    target_mongo_uri: Option<String>,

    /// Target database name
    #[arg(long, env = "TARGET_DB_NAME", default_value = "pathway-dev")]
    target_db_name: String,

    /// Email of the user to copy
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
    let target_uri = args
        .target_mongo_uri
        .clone()
        .unwrap_or_else(|| args.source_mongo_uri.clone());

    info!("Connecting to source (production) database...");
    let source = match MongoRepository::new(&args.source_mongo_uri, &args.source_db_name, timeout)
        .await
    {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to connect to source MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    info!("Connecting to target (dev) database...");
    let target = match MongoRepository::new(&target_uri, &args.target_db_name, timeout).await {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to connect to target MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    match copy_user_and_progress(&source, &target, &args.email).await {
        Ok(summary) => {
            info!(
                "User copied to dev database (user_id: {}, created: {}, mapped courses: {}, copied: {}, skipped: {})",
                summary.target_user_id,
                summary.user_created,
                summary.mapped_courses,
                summary.copied,
                summary.skipped
            );
        }
        Err(e) => {
            error!("Copy failed: {}", e);
            std::process::exit(1);
        }
    }
}
