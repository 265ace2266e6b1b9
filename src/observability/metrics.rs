//! Pipeline counters
//!
//! - Counters only, monotonic
//! - Reset only when the registry is recreated

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for queries and rows seen by a dashboard
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    queries_executed: AtomicU64,
    queries_failed: AtomicU64,
    rows_loaded: AtomicU64,
    renders_completed: AtomicU64,
    renders_aborted: AtomicU64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful query that returned `rows` rows
    pub fn record_query(&self, rows: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.rows_loaded.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn record_query_failure(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render(&self) {
        self.renders_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_abort(&self) {
        self.renders_aborted.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            rows_loaded: self.rows_loaded.load(Ordering::Relaxed),
            renders_completed: self.renders_completed.load(Ordering::Relaxed),
            renders_aborted: self.renders_aborted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub rows_loaded: u64,
    pub renders_completed: u64,
    pub renders_aborted: u64,
}
