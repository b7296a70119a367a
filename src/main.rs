use std::sync::Arc;

use actix_web::{middleware::from_fn, App, HttpServer};
use payment_scheduler::app;
use payment_scheduler::config::{AppConfig, Config, LogFormat};
use payment_scheduler::middleware::propagate_request_id;
use payment_scheduler::modules::ScheduleService;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(app: &AppConfig) {
    // RUST_LOG wins over LOG_LEVEL
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| app.default_log_filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(std::io::Error::other)?;
    init_tracing(&config.app);
    config.validate().map_err(std::io::Error::other)?;

    tracing::info!("Starting Payment Scheduler");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Schedule store: {:?}", config.app.store);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let repository = app::build_repository(&config)
        .await
        .map_err(std::io::Error::other)?;
    let service = Arc::new(ScheduleService::new(repository));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(propagate_request_id))
            .wrap(TracingLogger::default())
            .configure(app::configure(service.clone()))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
