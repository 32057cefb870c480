//! Error types for the health dashboard

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug)]
pub enum DashboardError {
    /// IO operation failed
    Io(std::io::Error),

    /// HTTP client could not be built or a request could not be prepared
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// Configuration error
    Config(String),

    /// No service with this key is registered
    UnknownService(String),

    /// Registered health URL cannot be requested
    InvalidUrl(String),

    /// Upstream health endpoint could not be reached
    Upstream(reqwest::Error),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(err) => write!(f, "IO error: {}", err),
            DashboardError::Http(err) => write!(f, "HTTP error: {}", err),
            DashboardError::Json(err) => write!(f, "JSON error: {}", err),
            DashboardError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DashboardError::UnknownService(key) => write!(f, "Unknown service: {}", key),
            DashboardError::InvalidUrl(msg) => write!(f, "Invalid health URL: {}", msg),
            DashboardError::Upstream(err) => write!(f, "Upstream unreachable: {}", err),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(err) => Some(err),
            DashboardError::Http(err) => Some(err),
            DashboardError::Json(err) => Some(err),
            DashboardError::Upstream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err)
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Json(err)
    }
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::UnknownService(_) => StatusCode::NOT_FOUND,
            DashboardError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            DashboardError::UnknownService(_) => json!({ "error": "Unknown service" }),
            DashboardError::Upstream(err) => json!({ "status": "DOWN", "error": err.to_string() }),
            other => json!({ "status": "DOWN", "error": other.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
