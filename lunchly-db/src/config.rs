//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: Postgres connection string (default: postgres://localhost/lunchly)
//! - `LUNCHLY_DB_MAX_CONNECTIONS`: pool size (default: 5)

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::db::PgStore;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/lunchly";

/// Pool size when `LUNCHLY_DB_MAX_CONNECTIONS` is unset or invalid.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load `.env` from the current directory (if any), then read the
    /// environment. Variables already set win over the file.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded .env from {}", path.display());
        }
        Self::from_env()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("LUNCHLY_DB_MAX_CONNECTIONS").ok(),
        )
    }

    /// Create config with an explicit URL (for testing)
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    fn from_vars(database_url: Option<String>, max_connections: Option<String>) -> Self {
        let max_connections = match max_connections.as_deref().map(str::parse::<u32>) {
            Some(Ok(n)) if n > 0 => n,
            Some(_) => {
                tracing::warn!("Invalid LUNCHLY_DB_MAX_CONNECTIONS, using {}", DEFAULT_MAX_CONNECTIONS);
                DEFAULT_MAX_CONNECTIONS
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Self {
            database_url: database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections,
        }
    }

    /// Open a pool sized by `max_connections`.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        tracing::info!(max_connections = self.max_connections, "connecting to lunchly database");
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await
    }

    /// Open a pool and wrap it as a [`PgStore`]
    pub async fn connect_store(&self) -> Result<PgStore, sqlx::Error> {
        Ok(PgStore::new(self.connect().await?))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = DbConfig::from_vars(None, None);
        assert_eq!(config.database_url, "postgres://localhost/lunchly");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn reads_explicit_values() {
        let config = DbConfig::from_vars(
            Some("postgres://db.internal/lunchly_test".into()),
            Some("12".into()),
        );
        assert_eq!(config.database_url, "postgres://db.internal/lunchly_test");
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn bad_pool_size_falls_back() {
        assert_eq!(DbConfig::from_vars(None, Some("lots".into())).max_connections, 5);
        assert_eq!(DbConfig::from_vars(None, Some("0".into())).max_connections, 5);
    }

    #[test]
    fn with_url_uses_default_pool_size() {
        let config = DbConfig::with_url("postgres://x/y");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connect_sizes_pool_from_config() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let config = DbConfig {
            database_url: url,
            max_connections: 2,
        };

        let pool = config.connect().await.expect("connect failed");
        assert_eq!(pool.options().get_max_connections(), 2);

        let (one,): (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(one, 1);
    }
}
