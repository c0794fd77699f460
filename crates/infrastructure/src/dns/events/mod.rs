pub mod chain;
pub mod metrics;
pub mod tracing_observer;

pub use chain::ObserverChain;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use tracing_observer::TracingObserver;
