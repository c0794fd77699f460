pub mod events;
pub mod server;
pub mod transport;

pub use events::{DispatchMetrics, MetricsSnapshot, ObserverChain, TracingObserver};
pub use server::DnsServerHandler;
pub use transport::UdpTransport;
