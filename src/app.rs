// Application assembly shared by the binary and the HTTP tests

use std::sync::Arc;

use actix_web::web;

use crate::config::{Config, StoreBackend};
use crate::core::Result;
use crate::middleware::{json_config, path_config};
use crate::modules::{
    health,
    schedules::{self, InMemoryScheduleRepository, MySqlScheduleRepository, ScheduleRepository},
    ScheduleService,
};

/// Build the schedule store selected by `SCHEDULE_STORE`
pub async fn build_repository(config: &Config) -> Result<Arc<dyn ScheduleRepository>> {
    match config.app.store {
        StoreBackend::MySql => {
            let pool = config.database.create_pool().await?;
            tracing::info!(
                "Database pool initialized ({} connections)",
                config.database.max_connections
            );

            config.database.migrate(&pool).await?;

            Ok(Arc::new(MySqlScheduleRepository::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory schedule store; data is lost on restart");
            Ok(Arc::new(InMemoryScheduleRepository::new()))
        }
    }
}

/// Register shared state, extractor configs and all routes
pub fn configure(service: Arc<ScheduleService>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(service))
            .app_data(json_config())
            .app_data(path_config())
            .configure(health::configure)
            .configure(schedules::configure);
    }
}
