//! Pathway seed - replace the course catalog with the fixed catalog
//!
//! Usage:
//!   pathway-seed --mongo-uri mongodb://localhost:27017 --db-name pathway
//!
//! Environment variables:
//!   MONGO_URI - MongoDB connection URI (default: mongodb://localhost:27017)
//!   DB_NAME   - Database name (default: pathway)

use clap::Parser;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathway::db::MongoRepository;
use pathway::seed::seed_courses;

#[derive(Parser, Debug)]
#[command(name = "pathway-seed")]
#[command(about = "Replace the Pathway course catalog with the fixed catalog")]
struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    mongo_uri: String,

    /// MongoDB database name
    #[arg(long, env = "DB_NAME", default_value = "pathway")]
    db_name: String,

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

    info!("Starting database seed...");
    match seed_courses(&repo).await {
        Ok(courses) => info!("Database seeded successfully ({} courses)", courses),
        Err(e) => {
            error!("Failed to seed courses: {}", e);
            std::process::exit(1);
        }
    }
}
