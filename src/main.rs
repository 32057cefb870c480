//! Service Health Dashboard Binary

use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use health_dashboard::config::Cli;
use health_dashboard::{AppState, Config, Result, ServiceRegistry, configure_routes};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    initialize_tracing();

    info!("Starting health dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().with_cli(Cli::parse());

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let registry = ServiceRegistry::load_or_fallback(&config.registry_path);
    info!(
        "Monitoring {} services every {:?}",
        registry.len(),
        config.poll_interval
    );

    let state = web::Data::new(AppState::new(&config, registry)?);
    let _timer = state.scheduler.start();

    let (host, port) = config.bind_address();
    info!("Health dashboard listening on http://{}:{}", host, port);

    HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .wrap(middleware::Logger::default())
                .configure(configure_routes)
        }
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
