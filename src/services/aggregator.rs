//! One health-check cycle across every registered service

use crate::models::run::{PendingRun, RunRecord, ServiceStatus};
use crate::registry::ServiceRegistry;
use crate::services::history::HistoryStore;
use crate::services::prober::HealthProbe;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Probes all services concurrently and records the outcome as one run
pub struct RunAggregator {
    registry: Arc<ServiceRegistry>,
    prober: Arc<dyn HealthProbe>,
    history: Arc<HistoryStore>,
}

impl RunAggregator {
    pub fn new(
        registry: Arc<ServiceRegistry>,
        prober: Arc<dyn HealthProbe>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            registry,
            prober,
            history,
        }
    }

    /// Run one cycle and append its record to the history.
    ///
    /// Cycles are not serialized against each other; the id is taken when the
    /// cycle finishes, so overlapping cycles are numbered in completion order.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> RunRecord {
        let timestamp = Utc::now();

        let checks = self.registry.iter().map(|(key, service)| {
            let prober = Arc::clone(&self.prober);
            async move {
                let result = prober.probe(&service.url).await;
                debug!(
                    "Service {} answered with {} (up: {})",
                    key, result.status_code, result.is_up
                );
                (key.clone(), ServiceStatus::from_up(result.is_up))
            }
        });

        let results = join_all(checks).await.into_iter().collect();
        let record = self.history.push(PendingRun::new(timestamp, results)).await;

        let down = record.down_count();
        if down > 0 {
            warn!(
                "Health run {} finished: {} ({} of {} services down)",
                record.id,
                record.overall,
                down,
                record.results.len()
            );
        } else {
            info!(
                "Health run {} finished: {} ({} services)",
                record.id,
                record.overall,
                record.results.len()
            );
        }

        record
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }
}
