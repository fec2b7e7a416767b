//! Atomic proxy statistics counters.
//!
//! Lock-free counters for request outcomes. All atomics use `Relaxed`
//! ordering: these are monotonic display counters with no synchronization
//! requirements.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

#[derive(Default)]
struct StatsInner {
    total_requests: AtomicU64,
    preflights: AtomicU64,
    rejected_endpoints: AtomicU64,
    rejected_methods: AtomicU64,
    forwarded: AtomicU64,
    upstream_failures: AtomicU64,
}

/// Thread-safe atomic proxy statistics. Cheap to clone (Arc).
#[derive(Clone, Default)]
pub struct ProxyStats {
    inner: Arc<StatsInner>,
}

/// Snapshot of current stats values, serializable to JSON.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub preflights: u64,
    pub rejected_endpoints: u64,
    pub rejected_methods: u64,
    /// Requests handed to the upstream client, successful or not.
    pub forwarded: u64,
    pub upstream_failures: u64,
}

impl ProxyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_requests(&self) {
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_preflights(&self) {
        self.inner.preflights.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_endpoints(&self) {
        self.inner.rejected_endpoints.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_methods(&self) {
        self.inner.rejected_methods.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_forwarded(&self) {
        self.inner.forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_upstream_failures(&self) {
        self.inner.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_requests: self.inner.total_requests.load(Ordering::Relaxed),
            preflights: self.inner.preflights.load(Ordering::Relaxed),
            rejected_endpoints: self.inner.rejected_endpoints.load(Ordering::Relaxed),
            rejected_methods: self.inner.rejected_methods.load(Ordering::Relaxed),
            forwarded: self.inner.forwarded.load(Ordering::Relaxed),
            upstream_failures: self.inner.upstream_failures.load(Ordering::Relaxed),
        }
    }
}
