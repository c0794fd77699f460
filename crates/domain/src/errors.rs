use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodingFailed(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Query cancelled")]
    Cancelled,

    #[error("DNS response ID mismatch from {server}: expected {expected:#06x}, got {actual:#06x}")]
    ResponseIdMismatch {
        server: String,
        expected: u16,
        actual: u16,
    },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },
}
