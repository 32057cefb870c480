use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::info;

use crate::errors::DashboardError;
use crate::services::proxy::fetch_live_health;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

// Liveness of the dashboard itself
pub async fn health_check() -> impl Responder {
    web::Json(HealthResponse {
        status: "OK".into(),
    })
}

// Live health of one service, relayed from its own endpoint
pub async fn live_health(
    data: web::Data<AppState>,
    key: web::Path<String>,
) -> Result<HttpResponse, DashboardError> {
    let key = key.into_inner();
    info!("Request for live health of service: {}", key);

    let upstream = fetch_live_health(&data.http_client, &data.registry, &key).await?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok(HttpResponse::build(status)
        .content_type(upstream.content_type)
        .body(upstream.body))
}
