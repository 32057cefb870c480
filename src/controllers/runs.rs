use actix_web::{HttpResponse, Responder, web};
use tracing::info;

use crate::state::AppState;

// Last runs, newest first
pub async fn list_runs(data: web::Data<AppState>) -> impl Responder {
    let runs = data.history.list().await;
    info!("Returning {} health runs", runs.len());

    HttpResponse::Ok().json(runs)
}

// Run a health check now and return its record
pub async fn trigger_run(data: web::Data<AppState>) -> impl Responder {
    info!("Request to trigger a health run");
    let record = data.scheduler.trigger().await;

    HttpResponse::Ok().json(record)
}
