//! Test utilities
//!
//! `lazy_state` builds an [`AppState`] whose pools never connect until used,
//! for router tests that stop before the database. The `containers` module
//! starts Postgres and Redis on first use and shares them across tests;
//! tests that need it are `#[ignore]`d since they require Docker.

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    config::{test_config, RedisConfig},
    db,
    judge::Judge,
    models::{ContactInfo, Role, SocialMedia, User},
    services::AuthService,
    state::AppState,
};

/// State over pools that fail fast if anything touches them
pub fn lazy_state(judge: Judge) -> AppState {
    let config = test_config();

    let db = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy(&config.database.url)
        .expect("valid database url");

    // Nothing listens on port 1; the rate limiter fails open
    let redis = db::create_redis_pool(&RedisConfig {
        url: "redis://127.0.0.1:1".to_string(),
    })
    .expect("valid redis url");

    AppState::new(db, redis, judge, config)
}

pub mod containers {
    use std::sync::{LazyLock, OnceLock};

    use testcontainers::{runners::AsyncRunner, ContainerAsync};
    use testcontainers_modules::{postgres::Postgres, redis::Redis};
    use tokio::sync::Mutex;

    static POSTGRES: OnceLock<ContainerAsync<Postgres>> = OnceLock::new();
    static REDIS: OnceLock<ContainerAsync<Redis>> = OnceLock::new();
    static STARTING: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    /// Get or start a PostgreSQL container (lazy initialization)
    pub async fn get_postgres() -> &'static ContainerAsync<Postgres> {
        let _guard = STARTING.lock().await;
        if POSTGRES.get().is_none() {
            let container = Postgres::default()
                .with_user("prephire")
                .with_password("prephire_test")
                .with_db_name("prephire_test")
                .start()
                .await
                .expect("Failed to start PostgreSQL container");

            let _ = POSTGRES.set(container);
        }
        POSTGRES.get().expect("postgres container initialized")
    }

    /// Get or start a Redis container (lazy initialization)
    pub async fn get_redis() -> &'static ContainerAsync<Redis> {
        let _guard = STARTING.lock().await;
        if REDIS.get().is_none() {
            let container = Redis::default()
                .start()
                .await
                .expect("Failed to start Redis container");

            let _ = REDIS.set(container);
        }
        REDIS.get().expect("redis container initialized")
    }

    /// Get PostgreSQL connection URL from the container
    pub async fn postgres_url() -> String {
        let container = get_postgres().await;
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        format!("postgres://prephire:prephire_test@{}:{}/prephire_test", host, port)
    }

    /// Get Redis connection URL from the container
    pub async fn redis_url() -> String {
        let container = get_redis().await;
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(6379).await.unwrap();
        format!("redis://{}:{}", host, port)
    }
}

/// Migrated pool on the shared Postgres container
pub async fn test_pool() -> PgPool {
    let url = containers::postgres_url().await;
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Register a user with a unique email and return it
pub async fn create_user(pool: &PgPool, role: Role) -> User {
    let email = format!("{}@example.test", uuid::Uuid::new_v4());
    let social_media = SocialMedia::default();
    let contact_info = ContactInfo::default();
    let company = match role {
        Role::Company => Some(crate::db::repositories::CompanyFields {
            company_name: "Acme",
            industry: "Software",
            size: None,
            location: "Berlin",
            website: None,
            description: None,
            social_media: &social_media,
            contact_info: &contact_info,
        }),
        Role::Candidate => None,
    };

    let (user, _) = AuthService::register(pool, "Test User", &email, "secret1", role, company)
        .await
        .expect("register test user");
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_containers_start_lazily() {
        let url1 = containers::postgres_url().await;
        assert!(url1.contains("postgres://"));

        let url2 = containers::postgres_url().await;
        assert_eq!(url1, url2);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_redis_rate_limit_counts() {
        let url = containers::redis_url().await;
        let pool = db::create_redis_pool(&RedisConfig { url }).unwrap();
        let key = format!("rl:test:{}", uuid::Uuid::new_v4());

        let first = crate::middleware::rate_limit::check_rate_limit(&pool, &key, 2, 60).await.unwrap();
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        crate::middleware::rate_limit::check_rate_limit(&pool, &key, 2, 60).await.unwrap();
        let third = crate::middleware::rate_limit::check_rate_limit(&pool, &key, 2, 60).await.unwrap();
        assert!(!third.allowed);
        assert!(third.reset <= 60);
    }
}
