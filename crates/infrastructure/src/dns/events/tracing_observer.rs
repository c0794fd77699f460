use dns_intercept_application::ports::{DispatchEvent, DispatchObserver};
use tracing::{debug, info, warn};

/// Writes dispatch events to the process log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn record(&self, event: &DispatchEvent) {
        match event {
            DispatchEvent::QueryReceived { name, record_type } => {
                debug!(domain = %name, record_type = ?record_type, "DNS query received");
            }
            DispatchEvent::Intercepted {
                name,
                record_type,
                answer: Some(address),
            } => {
                info!(
                    domain = %name,
                    record_type = ?record_type,
                    answer = %address,
                    "Intercepted query"
                );
            }
            DispatchEvent::Intercepted {
                name,
                record_type,
                answer: None,
            } => {
                info!(
                    domain = %name,
                    record_type = ?record_type,
                    "Intercepted query with empty answer"
                );
            }
            DispatchEvent::Forwarded { upstream } => {
                info!(upstream = %upstream, "Forwarding request to upstream");
            }
            DispatchEvent::Failed { stage, reason } => {
                warn!(stage = %stage, error = %reason, "Query dropped");
            }
        }
    }
}
