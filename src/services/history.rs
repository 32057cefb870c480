//! Bounded in-memory history of health-check runs

use crate::models::run::{PendingRun, RunRecord};
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;

/// Number of runs kept in memory
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Default)]
struct HistoryInner {
    last_id: u64,
    runs: VecDeque<RunRecord>,
}

/// Thread-safe, newest-first buffer of run records.
///
/// Id allocation and insertion happen under one write guard, so readers never see
/// a record without every older one that still fits in the buffer.
#[derive(Debug)]
pub struct HistoryStore {
    inner: RwLock<HistoryInner>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HistoryInner::default()),
            capacity: HISTORY_CAPACITY,
        }
    }

    /// Assign the next id to a finished run and insert it at the front
    pub async fn push(&self, pending: PendingRun) -> RunRecord {
        let mut inner = self.inner.write().await;

        inner.last_id += 1;
        let record = pending.into_record(inner.last_id);

        inner.runs.push_front(record.clone());
        if inner.runs.len() > self.capacity {
            if let Some(evicted) = inner.runs.pop_back() {
                debug!("History full, evicted run {}", evicted.id);
            }
        }

        record
    }

    /// Snapshot of the stored runs, newest first
    pub async fn list(&self) -> Vec<RunRecord> {
        let inner = self.inner.read().await;
        inner.runs.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.runs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
