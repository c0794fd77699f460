use dns_intercept_application::use_cases::dns::encode_message;
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
pub enum FakeUpstreamMode {
    /// Reply with one A record for the first question.
    Answer(Ipv4Addr),
    /// Reply with the transaction ID flipped.
    WrongId(Ipv4Addr),
    /// Swallow every query.
    Silent,
}

/// Loopback resolver standing in for the real upstream.
pub struct FakeUpstream {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    task: JoinHandle<()>,
}

impl FakeUpstream {
    pub async fn start(mode: FakeUpstreamMode) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                let Ok((len, from)) = socket.recv_from(&mut buf).await else {
                    break;
                };
                let query = buf[..len].to_vec();
                log.lock().unwrap().push(query.clone());

                let reply = match mode {
                    FakeUpstreamMode::Answer(ip) => answer(&query, ip, None),
                    FakeUpstreamMode::WrongId(ip) => answer(&query, ip, Some(!query_id(&query))),
                    FakeUpstreamMode::Silent => continue,
                };
                let _ = socket.send_to(&reply, from).await;
            }
        });

        Self {
            addr,
            received,
            task,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn query_id(query: &[u8]) -> u16 {
    u16::from_be_bytes([query[0], query[1]])
}

fn answer(query: &[u8], ip: Ipv4Addr, id_override: Option<u16>) -> Vec<u8> {
    let request = Message::from_vec(query).unwrap();
    let id = id_override.unwrap_or(request.id());

    let mut reply = Message::new(id, MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.add_queries(request.queries().iter().cloned());
    if let Some(question) = request.queries().first() {
        reply.add_answer(Record::from_rdata(question.name().clone(), 120, RData::A(A(ip))));
    }
    encode_message(&reply).unwrap()
}
