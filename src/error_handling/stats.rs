//! Request statistics tracking.
//!
//! Counts requests and failures per endpoint so a run can report how much
//! quota it spent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::Endpoint;

/// Thread-safe per-endpoint request counters.
///
/// Every endpoint is initialized to zero on creation, so lookups never miss.
/// Share across tasks with `Arc`.
pub struct RequestStats {
    requests: HashMap<Endpoint, AtomicUsize>,
    failures: HashMap<Endpoint, AtomicUsize>,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStats {
    pub fn new() -> Self {
        let mut requests = HashMap::new();
        let mut failures = HashMap::new();
        for endpoint in Endpoint::iter() {
            requests.insert(endpoint, AtomicUsize::new(0));
            failures.insert(endpoint, AtomicUsize::new(0));
        }
        RequestStats { requests, failures }
    }

    /// Records one request sent to `endpoint`.
    pub fn record_request(&self, endpoint: Endpoint) {
        if let Some(counter) = self.requests.get(&endpoint) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records one failed request to `endpoint`.
    pub fn record_failure(&self, endpoint: Endpoint) {
        if let Some(counter) = self.failures.get(&endpoint) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn request_count(&self, endpoint: Endpoint) -> usize {
        self.requests
            .get(&endpoint)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn failure_count(&self, endpoint: Endpoint) -> usize {
        self.failures
            .get(&endpoint)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        Endpoint::iter().map(|e| self.request_count(e)).sum()
    }

    pub fn total_failures(&self) -> usize {
        Endpoint::iter().map(|e| self.failure_count(e)).sum()
    }
}
