//! Configuration loading for the dbchat TUI.
//!
//! The config file is optional: with no `--config` argument and no
//! `DBCHAT_CONFIG` environment variable, defaults apply and the API key is
//! taken from `GROQ_API_KEY`.

use dbchat_db::DbConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub database: DatabaseOverrides,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            database: DatabaseOverrides::default(),
            log_path: default_log_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key; falls back to the GROQ_API_KEY environment variable.
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_rpm")]
    pub requests_per_minute: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            requests_per_minute: default_rpm(),
        }
    }
}

/// Optional overrides for the connection form's initial values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
}

fn default_model() -> String {
    dbchat_llm::DEFAULT_MODEL.to_string()
}

fn default_rpm() -> u32 {
    60
}

fn default_log_path() -> PathBuf {
    PathBuf::from("dbchat.log")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("Missing {field} (set it in the config file or the GROQ_API_KEY environment variable)")]
    Missing { field: &'static str },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = match config_path_from_args().or_else(config_path_from_env) {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "llm.model",
                reason: "must not be empty".to_string(),
            });
        }
        if self.llm.requests_per_minute == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.requests_per_minute",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the provider API key from config or environment.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.llm.api_key {
            if !key.trim().is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing {
                field: "llm.api_key",
            })
    }

    /// Initial database settings: environment first, file overrides on top.
    pub fn initial_db_config(&self) -> DbConfig {
        let mut config = DbConfig::from_env();
        if let Some(host) = &self.database.host {
            config.host = host.clone();
        }
        if let Some(port) = self.database.port {
            config.port = port;
        }
        if let Some(user) = &self.database.user {
            config.user = user.clone();
        }
        if let Some(password) = &self.database.password {
            config.password = password.clone();
        }
        if let Some(dbname) = &self.database.dbname {
            config.dbname = dbname.clone();
        }
        config
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("DBCHAT_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
