//! Database connection pool configuration.

use dbchat_core::{ChatResult, DbError};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

/// Database connection pool configuration.
///
/// Built from discrete fields rather than a URI, so passwords never need
/// percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "emp".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
        }
    }
}

impl DbConfig {
    /// Create a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("DBCHAT_DB_HOST").unwrap_or(defaults.host),
            port: std::env::var("DBCHAT_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: std::env::var("DBCHAT_DB_NAME").unwrap_or(defaults.dbname),
            user: std::env::var("DBCHAT_DB_USER").unwrap_or(defaults.user),
            password: std::env::var("DBCHAT_DB_PASSWORD").unwrap_or(defaults.password),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> ChatResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DbError::PoolCreateFailed {
                reason: e.to_string(),
            })?;

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_local_postgres() {
        let config = DbConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
    }

    #[test]
    fn test_create_pool_from_defaults() {
        // Pool creation is lazy; no server is contacted here.
        let config = DbConfig::default();
        assert!(config.create_pool().is_ok());
    }
}
