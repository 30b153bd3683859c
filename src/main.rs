//! Pathway - learning platform backend

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pathway::{
    config::Args,
    db::{MemoryRepository, MongoRepository, Repository},
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pathway={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Pathway - Learning Platform Backend");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("MongoDB: {} (db: {})", args.mongo_uri, args.db_name);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("======================================");

    // Connect to MongoDB (in-memory fallback in dev mode)
    let repo: Arc<dyn Repository> =
        match MongoRepository::new(&args.mongo_uri, &args.db_name, args.store_timeout()).await {
            Ok(repo) => {
                info!("MongoDB connected successfully");
                Arc::new(repo)
            }
            Err(e) => {
                if args.dev_mode {
                    warn!("MongoDB connection failed (dev mode, using in-memory store): {}", e);
                    Arc::new(MemoryRepository::new())
                } else {
                    error!("MongoDB connection failed: {}", e);
                    std::process::exit(1);
                }
            }
        };

    let state = Arc::new(server::AppState::new(args, repo));

    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
