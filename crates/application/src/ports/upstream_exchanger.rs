use async_trait::async_trait;
use dns_intercept_domain::DomainError;

/// Sends an already-encoded query to the upstream resolver and returns the
/// raw reply.
///
/// Implementations must not rewrite `query`. Dropping the returned future
/// abandons the exchange.
#[async_trait]
pub trait UpstreamExchanger: Send + Sync {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError>;

    /// Human-readable upstream identifier, used in events and logs.
    fn upstream(&self) -> String;
}
