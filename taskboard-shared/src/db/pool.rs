/// Connection pool for the PostgreSQL store

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a free connection
    pub acquire_timeout_seconds: u64,
    /// None keeps idle connections open forever
    pub idle_timeout_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
        }
    }
}

/// Connects and fails fast if the database does not answer a trivial query
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;
    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    let answer: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    debug!(answer, "Database ping");

    match answer {
        1 => Ok(()),
        other => Err(sqlx::Error::Protocol(format!(
            "database ping returned {}",
            other
        ))),
    }
}

pub async fn close_pool(pool: PgPool) {
    pool.close().await;
    info!("Database connections closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_sizing() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout_seconds, 30);
        assert_eq!(config.idle_timeout_seconds, Some(600));
        assert!(config.url.is_empty());
    }
}
