use crate::config::env_or;
use crate::core::{AppError, Result};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// `DATABASE_URL` is only mandatory when the MySQL store is selected
    pub fn from_env(require_url: bool) -> Result<Self> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if !require_url => String::new(),
            Err(_) => {
                return Err(AppError::Configuration("DATABASE_URL not set".to_string()));
            }
        };

        Ok(DatabaseConfig {
            url,
            pool_size: env_or("DATABASE_POOL_SIZE", "2")?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", "10")?,
            run_migrations: env_or("DATABASE_RUN_MIGRATIONS", "true")?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(AppError::Configuration("DATABASE_URL not set".to_string()));
        }

        if self.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        if self.pool_size > self.max_connections {
            return Err(AppError::Configuration(format!(
                "DATABASE_POOL_SIZE ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                self.pool_size, self.max_connections
            )));
        }

        Ok(())
    }

    /// Create a MySQL connection pool
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        let pool = MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // 30 minutes
            .test_before_acquire(true)
            .connect(&self.url)
            .await?;

        Ok(pool)
    }

    /// Apply the embedded migrations in `migrations/`
    pub async fn migrate(&self, pool: &MySqlPool) -> Result<()> {
        if !self.run_migrations {
            tracing::info!("Skipping database migrations (DATABASE_RUN_MIGRATIONS=false)");
            return Ok(());
        }

        sqlx::migrate!("./migrations").run(pool).await?;
        tracing::info!("Database migrations applied");

        Ok(())
    }
}
