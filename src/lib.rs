//! Service Health Dashboard Library
//!
//! Polls the health endpoints of a configured set of backend services on a fixed
//! schedule, keeps a bounded history of the results and serves both the live and
//! the historical view over HTTP.

pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod registry;
pub mod services;
pub mod state;

pub use config::Config;
pub use controllers::configure_routes;
pub use errors::{DashboardError, Result};
pub use models::run::{OverallStatus, RunRecord, ServiceStatus};
pub use registry::{ServiceEntry, ServiceRegistry};
pub use services::aggregator::RunAggregator;
pub use services::history::HistoryStore;
pub use services::prober::{HealthProbe, HttpProber, ProbeResult};
pub use services::scheduler::Scheduler;
pub use state::AppState;
