//! Timed and on-demand health-check runs

use crate::models::run::RunRecord;
use crate::services::aggregator::RunAggregator;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info};

/// Drives the aggregator on a fixed interval, once shortly after startup and on request
#[derive(Clone)]
pub struct Scheduler {
    aggregator: Arc<RunAggregator>,
    interval: Duration,
    warmup_delay: Duration,
}

impl Scheduler {
    pub fn new(aggregator: Arc<RunAggregator>, interval: Duration, warmup_delay: Duration) -> Self {
        Self {
            aggregator,
            interval,
            warmup_delay,
        }
    }

    /// Spawn the warm-up run and the periodic timer.
    ///
    /// The periodic timer first fires one full interval after start. Every firing
    /// runs its cycle in a task of its own, so a slow cycle never holds back the next.
    pub fn start(&self) -> JoinHandle<()> {
        info!(
            "Starting health scheduler: every {:?}, first run after {:?}",
            self.interval, self.warmup_delay
        );

        let warmup = Arc::clone(&self.aggregator);
        let warmup_delay = self.warmup_delay;
        tokio::spawn(async move {
            sleep(warmup_delay).await;
            debug!("Running warm-up health check");
            warmup.run_cycle().await;
        });

        let aggregator = Arc::clone(&self.aggregator);
        let period = self.interval;
        tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                let aggregator = Arc::clone(&aggregator);
                tokio::spawn(async move {
                    aggregator.run_cycle().await;
                });
            }
        })
    }

    /// Run one extra cycle now and return its record
    pub async fn trigger(&self) -> RunRecord {
        debug!("Running on-demand health check");
        self.aggregator.run_cycle().await
    }
}
