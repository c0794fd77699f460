use dns_intercept_application::ports::{DispatchEvent, DispatchObserver};
use std::sync::Arc;

/// Fans each event out to every registered observer, in order.
#[derive(Clone, Default)]
pub struct ObserverChain {
    observers: Vec<Arc<dyn DispatchObserver>>,
}

impl ObserverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl DispatchObserver for ObserverChain {
    fn record(&self, event: &DispatchEvent) {
        for observer in &self.observers {
            observer.record(event);
        }
    }
}

impl std::fmt::Debug for ObserverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverChain")
            .field("observers", &self.observers.len())
            .finish()
    }
}
