//! Load sample tests and coding problems into the database.
//!
//! Usage: `seed [SEED_DIR]`. The directory defaults to `./seeds` and must
//! hold `tests.json` and `coding_problems.json`. Only `DATABASE_URL` is read
//! from the environment.

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prephire::{
    config::DatabaseConfig,
    db,
    handlers::{assessments::request::CreateTestRequest, coding::request::CreateProblemRequest},
    seed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("seeds"));

    let database = DatabaseConfig {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
        max_connections: 2,
    };

    let pool = db::create_pool(&database).await?;
    db::run_migrations(&pool).await?;

    let tests: Vec<CreateTestRequest> = seed::read(&dir.join(seed::TESTS_FILE)).await?;
    let report = seed::seed_tests(&pool, &tests).await?;
    tracing::info!(inserted = report.inserted, skipped = report.skipped, "Tests seeded");

    let problems: Vec<CreateProblemRequest> = seed::read(&dir.join(seed::CODING_PROBLEMS_FILE)).await?;
    let report = seed::seed_coding_problems(&pool, &problems).await?;
    tracing::info!(inserted = report.inserted, skipped = report.skipped, "Coding problems seeded");

    pool.close().await;
    Ok(())
}
