use actix_web::{HttpResponse, Responder, web};
use tracing::info;

use crate::state::AppState;

// List all registered services
pub async fn list_services(data: web::Data<AppState>) -> impl Responder {
    info!("Request to list all services");
    info!("Returning list of {} services", data.registry.len());

    HttpResponse::Ok().json(&*data.registry)
}
