/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `STORAGE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `PASSWORD_MEMORY_KIB` / `PASSWORD_ITERATIONS` / `PASSWORD_PARALLELISM`:
///   Argon2id costs (default: 65536 / 3 / 4)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: Log filter, read by the tracing subscriber
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use std::str::FromStr;
use taskboard_shared::auth::password::HashingParams;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Which store backs the API
    pub storage: StorageBackend,

    /// Database configuration; present when `storage` is Postgres
    pub database: Option<DatabaseConfig>,

    /// Argon2id cost parameters
    pub password: HashingParams,

    /// Log output format
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!("unknown STORAGE_BACKEND '{}' (expected postgres or memory)", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown LOG_FORMAT '{}' (expected pretty or json)", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing while the Postgres backend is selected
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_host = var("API_HOST", "0.0.0.0");
        let api_port = var("API_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid API_PORT: {}", e))?;

        let cors_origins = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let storage = var("STORAGE_BACKEND", "postgres").parse::<StorageBackend>()?;

        let database = match storage {
            StorageBackend::Postgres => {
                let url = lookup("DATABASE_URL").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL environment variable is required")
                })?;
                let max_connections = var("DATABASE_MAX_CONNECTIONS", "10")
                    .parse::<u32>()
                    .map_err(|e| anyhow::anyhow!("invalid DATABASE_MAX_CONNECTIONS: {}", e))?;

                Some(DatabaseConfig {
                    url,
                    max_connections,
                })
            }
            StorageBackend::Memory => None,
        };

        let defaults = HashingParams::default();
        let parse_cost = |key: &str, default: u32| -> anyhow::Result<u32> {
            var(key, &default.to_string())
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e))
        };
        let password = HashingParams {
            memory_kib: parse_cost("PASSWORD_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_cost("PASSWORD_ITERATIONS", defaults.iterations)?,
            parallelism: parse_cost("PASSWORD_PARALLELISM", defaults.parallelism)?,
        };

        let log_format = var("LOG_FORMAT", "pretty").parse::<LogFormat>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            storage,
            database,
            password,
            log_format,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = config_from(&[("DATABASE_URL", "postgresql://localhost/test")]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.api.cors_origins, vec!["*"]);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.password, HashingParams::default());

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgresql://localhost/test");
        assert_eq!(database.max_connections, 10);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_memory_backend() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "3000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("LOG_FORMAT", "json"),
            ("PASSWORD_ITERATIONS", "1"),
        ])
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.api.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.password.iterations, 1);
        assert_eq!(config.password.memory_kib, 65536);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("STORAGE_BACKEND", "sqlite")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "memory"), ("API_PORT", "http")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "memory"), ("LOG_FORMAT", "xml")]).is_err());
    }
}
