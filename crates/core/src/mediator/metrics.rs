use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;

use super::Result;

/// How a dispatched request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn of<T>(result: &Result<T>) -> Self {
        if result.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Receives per-request-type counters from the metrics behavior.
pub trait MetricsSink: Send + Sync {
    fn record_started(&self, request: &'static str);
    fn record_completed(&self, request: &'static str, outcome: Outcome);
}

#[derive(Debug, Default)]
struct RequestCounters {
    requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of one request type's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestCountersSnapshot {
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
}

impl RequestCounters {
    fn snapshot(&self) -> RequestCountersSnapshot {
        RequestCountersSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Process-local [`MetricsSink`] backing the `/metrics` endpoint.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: RwLock<HashMap<&'static str, Arc<RequestCounters>>>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self, request: &'static str) -> Arc<RequestCounters> {
        if let Some(counters) = self
            .counters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(request)
        {
            return Arc::clone(counters);
        }

        let mut counters = self
            .counters
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(counters.entry(request).or_default())
    }

    /// Counters for one request type, if it was ever dispatched.
    pub fn get(&self, request: &str) -> Option<RequestCountersSnapshot> {
        self.counters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(request)
            .map(|counters| counters.snapshot())
    }

    /// All counters keyed by request name.
    pub fn snapshot(&self) -> BTreeMap<&'static str, RequestCountersSnapshot> {
        self.counters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(name, counters)| (*name, counters.snapshot()))
            .collect()
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record_started(&self, request: &'static str) {
        self.counters(request)
            .requests
            .fetch_add(1, Ordering::Relaxed);
    }

    fn record_completed(&self, request: &'static str, outcome: Outcome) {
        let counters = self.counters(request);
        match outcome {
            Outcome::Success => counters.successes.fetch_add(1, Ordering::Relaxed),
            Outcome::Failure => counters.failures.fetch_add(1, Ordering::Relaxed),
        };
    }
}
