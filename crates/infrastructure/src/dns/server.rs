use dns_intercept_application::use_cases::{DispatchOutcome, DispatchQueryUseCase};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Largest datagram accepted from clients.
const MAX_DATAGRAM_SIZE: usize = 4096;

/// Glue between a UDP socket and the dispatch use case.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<DispatchQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<DispatchQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_datagram(
        &self,
        datagram: &[u8],
        cancel: &CancellationToken,
    ) -> DispatchOutcome {
        self.use_case.execute(datagram, cancel).await
    }

    /// Receive loop: one task per datagram until `shutdown` fires.
    ///
    /// Cancelling `shutdown` also cancels every in-flight request, so pending
    /// upstream exchanges are abandoned without a reply.
    pub async fn serve(&self, socket: Arc<UdpSocket>, shutdown: CancellationToken) {
        let mut recv_buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            let (len, from) = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("DNS server shutting down");
                    break;
                }
                result = socket.recv_from(&mut recv_buf) => match result {
                    Ok(received) => received,
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
            let handler = self.clone();
            let socket = Arc::clone(&socket);
            let cancel = shutdown.child_token();

            tokio::spawn(async move {
                handler.respond(&socket, &datagram, from, &cancel).await;
            });
        }
    }

    async fn respond(
        &self,
        socket: &UdpSocket,
        datagram: &[u8],
        from: SocketAddr,
        cancel: &CancellationToken,
    ) {
        let Some(reply) = self.handle_datagram(datagram, cancel).await.into_reply() else {
            debug!(client = %from, "No reply sent");
            return;
        };

        if let Err(e) = socket.send_to(&reply, from).await {
            error!(client = %from, error = %e, "Failed to send response");
        }
    }
}
