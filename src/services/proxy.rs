//! Live pass-through of a single service's health endpoint

use crate::errors::{DashboardError, Result};
use crate::registry::ServiceRegistry;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

/// Upstream answer, relayed verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Fetch the health endpoint registered under `key` without touching the run history
pub async fn fetch_live_health(
    client: &Client,
    registry: &ServiceRegistry,
    key: &str,
) -> Result<UpstreamResponse> {
    let service = registry
        .get(key)
        .ok_or_else(|| DashboardError::UnknownService(key.to_string()))?;

    debug!("Proxying live health check for {} to {}", key, service.url);

    let response = client
        .get(&service.url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_builder() {
                DashboardError::InvalidUrl(format!("{}: {}", service.url, e))
            } else {
                warn!("Live health check for {} failed: {}", key, e);
                DashboardError::Upstream(e)
            }
        })?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let body = response.bytes().await.map_err(DashboardError::Upstream)?;

    Ok(UpstreamResponse {
        status,
        content_type,
        body: body.to_vec(),
    })
}
