//! Database and Redis connection management

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::{DatabaseConfig, RedisConfig};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Create the Redis pool used by the rate limiter.
///
/// No connection is opened here; the first rate-limit check does that.
pub fn create_redis_pool(config: &RedisConfig) -> Result<deadpool_redis::Pool, deadpool_redis::CreatePoolError> {
    deadpool_redis::Config::from_url(config.url.as_str()).create_pool(Some(deadpool_redis::Runtime::Tokio1))
}

/// Test database connection
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
