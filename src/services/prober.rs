//! Outbound health probes

use crate::errors::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// HTTP status received, 0 when no response arrived
    pub status_code: u16,
    pub is_up: bool,
}

impl ProbeResult {
    pub fn unreachable() -> Self {
        Self {
            status_code: 0,
            is_up: false,
        }
    }
}

/// Performs one health check against a URL.
///
/// Implementations never fail: every problem is reported as a DOWN result.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeResult;
}

/// Probe backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

/// Client for health requests. Redirects are not followed, a 3xx is reported as received.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .redirect(Policy::none())
        .user_agent(format!("health-dashboard/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(DashboardError::Http)
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthProbe for HttpProber {
    async fn probe(&self, url: &str) -> ProbeResult {
        let response = match self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Health probe to {} failed: {}", url, e);
                return ProbeResult::unreachable();
            }
        };

        let status_code = response.status().as_u16();

        match response.text().await {
            Ok(body) => ProbeResult {
                status_code,
                is_up: classify(status_code, &body),
            },
            Err(e) => {
                warn!("Failed to read health body from {}: {}", url, e);
                ProbeResult {
                    status_code,
                    is_up: false,
                }
            }
        }
    }
}

/// Decide whether a completed health response means the service is up.
///
/// An empty body counts as `{}` and therefore as DOWN, while a body that is not
/// JSON at all counts as UP because the 2xx alone is taken as healthy.
pub fn classify(status_code: u16, body: &str) -> bool {
    if !(200..300).contains(&status_code) {
        return false;
    }

    let body = if body.is_empty() { "{}" } else { body };

    match serde_json::from_str::<Value>(body) {
        // `null` has no fields to inspect, same as an unstructured payload
        Ok(Value::Null) => true,
        Ok(payload) => payload.get("status").and_then(Value::as_str) == Some("UP"),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_classify_status_field() {
        assert!(classify(200, r#"{"status":"UP"}"#));
        assert!(!classify(200, r#"{"status":"DOWN"}"#));
        assert!(!classify(204, r#"{"status":"up"}"#));
    }

    #[test]
    fn test_classify_empty_and_unstructured_bodies() {
        assert!(!classify(200, ""));
        assert!(!classify(200, "{}"));
        assert!(!classify(200, "[]"));
        assert!(classify(200, "not json"));
        assert!(classify(200, "null"));
    }

    #[test]
    fn test_classify_non_success_codes() {
        assert!(!classify(500, r#"{"status":"UP"}"#));
        assert!(!classify(302, "not json"));
        assert!(!classify(404, ""));
    }

    async fn probe_with(template: ResponseTemplate) -> ProbeResult {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actuator/health"))
            .and(header("accept", "application/json"))
            .respond_with(template)
            .mount(&server)
            .await;

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        prober
            .probe(&format!("{}/actuator/health", server.uri()))
            .await
    }

    #[tokio::test]
    async fn test_probe_reports_up() {
        let result = probe_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"UP"}"#)).await;
        assert_eq!(
            result,
            ProbeResult {
                status_code: 200,
                is_up: true
            }
        );
    }

    #[tokio::test]
    async fn test_probe_reports_down_payload() {
        let result =
            probe_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"DOWN"}"#)).await;
        assert!(!result.is_up);
        assert_eq!(result.status_code, 200);
    }

    #[tokio::test]
    async fn test_probe_empty_body_is_down() {
        let result = probe_with(ResponseTemplate::new(200)).await;
        assert!(!result.is_up);
    }

    #[tokio::test]
    async fn test_probe_plain_text_body_is_up() {
        let result = probe_with(ResponseTemplate::new(200).set_body_string("not json")).await;
        assert!(result.is_up);
    }

    #[tokio::test]
    async fn test_probe_server_error() {
        let result = probe_with(ResponseTemplate::new(500).set_body_string(r#"{"status":"UP"}"#)).await;
        assert_eq!(
            result,
            ProbeResult {
                status_code: 500,
                is_up: false
            }
        );
    }

    #[tokio::test]
    async fn test_redirect_is_reported_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actuator/health"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let result = prober
            .probe(&format!("{}/actuator/health", server.uri()))
            .await;

        assert_eq!(
            result,
            ProbeResult {
                status_code: 302,
                is_up: false
            }
        );
    }

    #[tokio::test]
    async fn test_probe_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let result = prober
            .probe(&format!("http://127.0.0.1:{}/actuator/health", port))
            .await;

        assert_eq!(result, ProbeResult::unreachable());
    }

    #[tokio::test]
    async fn test_probe_malformed_url() {
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let result = prober.probe("not a url").await;
        assert_eq!(result, ProbeResult::unreachable());
    }

    #[tokio::test]
    async fn test_probe_timeout_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"status":"UP"}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let prober = HttpProber::new(Duration::from_millis(200)).unwrap();
        let result = prober.probe(&server.uri()).await;
        assert_eq!(result, ProbeResult::unreachable());
    }
}
