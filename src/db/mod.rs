//! PostgreSQL storage for PrepHire
//!
//! The schema holds users, companies, jobs and their applications, MCQ tests
//! with their results, coding problems with their code submissions, and the
//! test and problem assignments sent to candidates.
//! Migrations under `migrations/` are applied at startup and by the `seed`
//! binary before any query runs.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::*;

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
