use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub store: StoreBackend,
}

impl AppConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> String {
        format!("payment_scheduler={},actix_web=info", self.log_level)
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::Configuration(format!(
                "Invalid LOG_FORMAT: {}",
                other
            ))),
        }
    }
}

/// Which schedule store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::Configuration(format!(
                "Invalid SCHEDULE_STORE: {}",
                other
            ))),
        }
    }
}

/// Read an environment variable, falling back to `default`, and parse it
pub(crate) fn env_or<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", key)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let store: StoreBackend = env::var("SCHEDULE_STORE")
            .unwrap_or_else(|_| "mysql".to_string())
            .parse()?;

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "pretty".to_string())
                    .parse()?,
                store,
            },
            database: DatabaseConfig::from_env(store == StoreBackend::MySql)?,
            server: ServerConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        if self.app.log_level.parse::<tracing::Level>().is_err() {
            return Err(AppError::Configuration(format!(
                "Invalid LOG_LEVEL: {}",
                self.app.log_level
            )));
        }

        if self.app.store == StoreBackend::MySql {
            self.database.validate()?;
        }

        Ok(())
    }
}
