use reqwest::Client as HttpClient;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::Result;
use crate::registry::ServiceRegistry;
use crate::services::aggregator::RunAggregator;
use crate::services::history::HistoryStore;
use crate::services::prober::{HealthProbe, HttpProber, build_client};
use crate::services::scheduler::Scheduler;

// App state
pub struct AppState {
    pub registry: Arc<ServiceRegistry>,
    pub history: Arc<HistoryStore>,
    pub scheduler: Scheduler,
    pub http_client: HttpClient,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, registry: ServiceRegistry) -> Result<Self> {
        let http_client = build_client(config.probe_timeout)?;

        let prober = HttpProber::with_client(http_client.clone());
        Ok(Self::with_prober(config, registry, http_client, Arc::new(prober)))
    }

    /// Build the state around a caller-supplied prober
    pub fn with_prober(
        config: &Config,
        registry: ServiceRegistry,
        http_client: HttpClient,
        prober: Arc<dyn HealthProbe>,
    ) -> Self {
        let registry = Arc::new(registry);
        let history = Arc::new(HistoryStore::new());
        let aggregator = Arc::new(RunAggregator::new(
            Arc::clone(&registry),
            prober,
            Arc::clone(&history),
        ));
        let scheduler = Scheduler::new(aggregator, config.poll_interval, config.warmup_delay);

        Self {
            registry,
            history,
            scheduler,
            http_client,
            public_dir: config.public_dir.clone(),
        }
    }
}
