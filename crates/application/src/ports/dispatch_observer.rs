use hickory_proto::rr::RecordType;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Inbound datagram was not a DNS message.
    Decode,
    /// A reply could not be serialized.
    Encode,
    /// Upstream exchange failed or returned garbage.
    Upstream,
    /// Request was cancelled before the upstream answered.
    Cancelled,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Upstream => "upstream",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    QueryReceived {
        name: Arc<str>,
        record_type: RecordType,
    },
    Intercepted {
        name: Arc<str>,
        record_type: RecordType,
        answer: Option<IpAddr>,
    },
    Forwarded {
        upstream: String,
    },
    Failed {
        stage: FailureStage,
        reason: String,
    },
}

/// Receives the outcome of every dispatch step.
///
/// Called inline on the request path, so implementations must be cheap.
pub trait DispatchObserver: Send + Sync {
    fn record(&self, event: &DispatchEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {
    fn record(&self, _event: &DispatchEvent) {}
}
