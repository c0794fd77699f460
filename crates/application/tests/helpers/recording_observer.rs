use dns_intercept_application::ports::{DispatchEvent, DispatchObserver};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DispatchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DispatchObserver for RecordingObserver {
    fn record(&self, event: &DispatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
