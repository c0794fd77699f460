use async_trait::async_trait;
use dns_intercept_application::ports::UpstreamExchanger;
use dns_intercept_domain::DomainError;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use super::messages::a_reply;

#[derive(Debug, Clone)]
pub enum UpstreamBehavior {
    /// Answer every query with one A record.
    Answer(Ipv4Addr),
    /// Return these bytes regardless of the query.
    Raw(Vec<u8>),
    Fail(DomainError),
    /// Never complete.
    Hang,
}

#[derive(Clone)]
pub struct MockUpstream {
    behavior: Arc<Mutex<UpstreamBehavior>>,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockUpstream {
    pub fn new(behavior: UpstreamBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: UpstreamBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamExchanger for MockUpstream {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.received.lock().unwrap().push(query.to_vec());
        let behavior = self.behavior.lock().unwrap().clone();

        match behavior {
            UpstreamBehavior::Answer(address) => Ok(a_reply(query, address)),
            UpstreamBehavior::Raw(bytes) => Ok(bytes),
            UpstreamBehavior::Fail(error) => Err(error),
            UpstreamBehavior::Hang => std::future::pending().await,
        }
    }

    fn upstream(&self) -> String {
        "mock-upstream:53".to_string()
    }
}
