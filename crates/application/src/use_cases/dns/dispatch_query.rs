use super::classify::{is_intercepted, presented_name};
use super::codec::{decode_message, encode_message};
use super::synthetic_answer::synthesize_answer;
use crate::ports::{
    DispatchEvent, DispatchObserver, FailureStage, NoopObserver, UpstreamExchanger,
};
use dns_intercept_domain::{DomainError, InterceptRule};
use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::RData;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What happened to one inbound datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Answered locally; carries the encoded reply.
    Intercepted(Vec<u8>),
    /// Relayed from upstream; carries the re-encoded upstream reply.
    Forwarded(Vec<u8>),
    /// Nothing is sent back to the client.
    Dropped(FailureStage),
}

impl DispatchOutcome {
    pub fn into_reply(self) -> Option<Vec<u8>> {
        match self {
            Self::Intercepted(bytes) | Self::Forwarded(bytes) => Some(bytes),
            Self::Dropped(_) => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }
}

/// Decides, per inbound message, between a local answer and the upstream.
///
/// Holds no per-request state; one instance serves all concurrent requests.
pub struct DispatchQueryUseCase {
    rule: Arc<InterceptRule>,
    upstream: Arc<dyn UpstreamExchanger>,
    observer: Arc<dyn DispatchObserver>,
}

impl DispatchQueryUseCase {
    pub fn new(rule: Arc<InterceptRule>, upstream: Arc<dyn UpstreamExchanger>) -> Self {
        Self {
            rule,
            upstream,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Handle one wire-format query.
    ///
    /// The first question under the intercept domain sends the whole message
    /// down the local path; later questions are neither answered nor
    /// forwarded. Without a match, `raw` goes upstream byte for byte.
    pub async fn execute(&self, raw: &[u8], cancel: &CancellationToken) -> DispatchOutcome {
        let request = match decode_message(raw) {
            Ok(message) => message,
            Err(e) => return self.fail(FailureStage::Decode, &e),
        };

        for query in request.queries() {
            let name: Arc<str> = Arc::from(presented_name(query.name()));
            self.observer.record(&DispatchEvent::QueryReceived {
                name: Arc::clone(&name),
                record_type: query.query_type(),
            });

            if is_intercepted(&name, &self.rule) {
                return self.intercept(&request, query, name);
            }
        }

        self.forward(raw, cancel).await
    }

    fn intercept(&self, request: &Message, query: &Query, name: Arc<str>) -> DispatchOutcome {
        let mut response = response_for(request);

        let answer = synthesize_answer(query, &self.rule);
        let address = answer.as_ref().and_then(|record| match record.data() {
            RData::A(a) => Some(IpAddr::V4(a.0)),
            _ => None,
        });
        if let Some(record) = answer {
            response.add_answer(record);
        }

        self.observer.record(&DispatchEvent::Intercepted {
            name,
            record_type: query.query_type(),
            answer: address,
        });

        match encode_message(&response) {
            Ok(bytes) => DispatchOutcome::Intercepted(bytes),
            Err(e) => self.fail(FailureStage::Encode, &e),
        }
    }

    async fn forward(&self, raw: &[u8], cancel: &CancellationToken) -> DispatchOutcome {
        self.observer.record(&DispatchEvent::Forwarded {
            upstream: self.upstream.upstream(),
        });

        let exchanged = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DomainError::Cancelled),
            result = self.upstream.exchange(raw) => result,
        };

        let reply = match exchanged {
            Ok(bytes) => bytes,
            Err(DomainError::Cancelled) => {
                return self.fail(FailureStage::Cancelled, &DomainError::Cancelled)
            }
            Err(e) => return self.fail(FailureStage::Upstream, &e),
        };

        let reply = match decode_message(&reply) {
            Ok(message) => message,
            Err(e) => return self.fail(FailureStage::Upstream, &e),
        };

        debug!(
            id = reply.id(),
            answers = reply.answers().len(),
            "Upstream reply received"
        );

        match encode_message(&reply) {
            Ok(bytes) => DispatchOutcome::Forwarded(bytes),
            Err(e) => self.fail(FailureStage::Encode, &e),
        }
    }

    fn fail(&self, stage: FailureStage, error: &DomainError) -> DispatchOutcome {
        self.observer.record(&DispatchEvent::Failed {
            stage,
            reason: error.to_string(),
        });
        DispatchOutcome::Dropped(stage)
    }
}

/// Fresh reply header and question section mirroring `request`.
fn response_for(request: &Message) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(true);
    response.add_queries(request.queries().iter().cloned());
    response
}
