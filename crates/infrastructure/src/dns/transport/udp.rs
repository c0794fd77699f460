//! UDP transport to the upstream resolver (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing), one datagram out and one back.
//! Truncated replies are relayed untouched; there is no TCP retry.

use async_trait::async_trait;
use dns_intercept_application::ports::UpstreamExchanger;
use dns_intercept_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport to a single upstream
pub struct UdpTransport {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn transport_error(&self, reason: impl ToString) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl UpstreamExchanger for UdpTransport {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error(format!("failed to bind UDP socket: {}", e)))?;

        let bytes_sent = tokio::time::timeout(self.timeout, socket.send_to(query, self.server_addr))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| self.transport_error(format!("failed to send query: {}", e)))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(self.timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| self.transport_error(format!("failed to receive response: {}", e)))?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);
        validate_response_id(query, &recv_buf, self.server_addr)?;

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }

    fn upstream(&self) -> String {
        self.server_addr.to_string()
    }
}

/// The first two bytes of query and response are the transaction ID; they
/// must agree.
pub fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 {
        return Err(DomainError::InvalidDnsMessage(
            "query shorter than a DNS ID".to_string(),
        ));
    }
    if response.len() < 2 {
        return Err(DomainError::InvalidDnsMessage(format!(
            "response from {} shorter than a DNS ID",
            server
        )));
    }

    let expected = u16::from_be_bytes([query[0], query[1]]);
    let actual = u16::from_be_bytes([response[0], response[1]]);
    if expected != actual {
        return Err(DomainError::ResponseIdMismatch {
            server: server.to_string(),
            expected,
            actual,
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod udp_test;
