use dashmap::DashMap;
use dns_intercept_application::ports::{DispatchEvent, DispatchObserver, FailureStage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Point-in-time copy of the dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub questions_seen: u64,
    pub intercepted: u64,
    pub intercepted_empty: u64,
    /// Messages sent upstream, whether or not a reply came back.
    pub forward_attempts: u64,
    pub failed_decode: u64,
    pub failed_encode: u64,
    pub failed_upstream: u64,
    pub cancelled: u64,
}

impl MetricsSnapshot {
    pub fn failed(&self) -> u64 {
        self.failed_decode + self.failed_encode + self.failed_upstream + self.cancelled
    }

    /// Forward attempts that got an upstream reply in time.
    pub fn relayed(&self) -> u64 {
        self.forward_attempts.saturating_sub(self.failed_upstream + self.cancelled)
    }
}

#[derive(Clone)]
pub struct DispatchMetrics {
    questions_seen: Arc<AtomicU64>,

    intercepted: Arc<AtomicU64>,

    intercepted_empty: Arc<AtomicU64>,

    forward_attempts: Arc<AtomicU64>,

    failed_decode: Arc<AtomicU64>,

    failed_encode: Arc<AtomicU64>,

    failed_upstream: Arc<AtomicU64>,

    cancelled: Arc<AtomicU64>,

    intercepted_names: Arc<DashMap<Arc<str>, u64>>,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self {
            questions_seen: Arc::new(AtomicU64::new(0)),
            intercepted: Arc::new(AtomicU64::new(0)),
            intercepted_empty: Arc::new(AtomicU64::new(0)),
            forward_attempts: Arc::new(AtomicU64::new(0)),
            failed_decode: Arc::new(AtomicU64::new(0)),
            failed_encode: Arc::new(AtomicU64::new(0)),
            failed_upstream: Arc::new(AtomicU64::new(0)),
            cancelled: Arc::new(AtomicU64::new(0)),
            intercepted_names: Arc::new(DashMap::new()),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            questions_seen: self.questions_seen.load(Ordering::Relaxed),
            intercepted: self.intercepted.load(Ordering::Relaxed),
            intercepted_empty: self.intercepted_empty.load(Ordering::Relaxed),
            forward_attempts: self.forward_attempts.load(Ordering::Relaxed),
            failed_decode: self.failed_decode.load(Ordering::Relaxed),
            failed_encode: self.failed_encode.load(Ordering::Relaxed),
            failed_upstream: self.failed_upstream.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }

    pub fn intercepted_count(&self, name: &str) -> u64 {
        self.intercepted_names.get(name).map(|v| *v).unwrap_or(0)
    }

    pub fn top_intercepted(&self, n: usize) -> Vec<(String, u64)> {
        let mut names: Vec<_> = self
            .intercepted_names
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();

        names.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        names.truncate(n);
        names
    }

    pub fn reset(&self) {
        self.questions_seen.store(0, Ordering::Relaxed);
        self.intercepted.store(0, Ordering::Relaxed);
        self.intercepted_empty.store(0, Ordering::Relaxed);
        self.forward_attempts.store(0, Ordering::Relaxed);
        self.failed_decode.store(0, Ordering::Relaxed);
        self.failed_encode.store(0, Ordering::Relaxed);
        self.failed_upstream.store(0, Ordering::Relaxed);
        self.cancelled.store(0, Ordering::Relaxed);
        self.intercepted_names.clear();
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchObserver for DispatchMetrics {
    fn record(&self, event: &DispatchEvent) {
        match event {
            DispatchEvent::QueryReceived { .. } => {
                self.questions_seen.fetch_add(1, Ordering::Relaxed);
            }
            DispatchEvent::Intercepted { name, answer, .. } => {
                self.intercepted.fetch_add(1, Ordering::Relaxed);
                if answer.is_none() {
                    self.intercepted_empty.fetch_add(1, Ordering::Relaxed);
                }
                self.intercepted_names
                    .entry(Arc::clone(name))
                    .and_modify(|c| *c += 1)
                    .or_insert(1);
            }
            DispatchEvent::Forwarded { .. } => {
                self.forward_attempts.fetch_add(1, Ordering::Relaxed);
            }
            DispatchEvent::Failed { stage, .. } => {
                let counter = match stage {
                    FailureStage::Decode => &self.failed_decode,
                    FailureStage::Encode => &self.failed_encode,
                    FailureStage::Upstream => &self.failed_upstream,
                    FailureStage::Cancelled => &self.cancelled,
                };
                counter.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
