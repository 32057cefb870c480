use actix_web::web;

pub mod assets;
pub mod health;
pub mod runs;
pub mod service;

/// Register every dashboard route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/services", web::get().to(service::list_services))
                .route("/health/{key}", web::get().to(health::live_health))
                .route("/cron/runs", web::get().to(runs::list_runs))
                .route("/cron/run", web::post().to(runs::trigger_run)),
        )
        .route("/", web::get().to(assets::index))
        .route("/{path:.*}", web::get().to(assets::static_file));
}
