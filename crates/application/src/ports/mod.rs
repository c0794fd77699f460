mod dispatch_observer;
mod upstream_exchanger;

pub use dispatch_observer::{DispatchEvent, DispatchObserver, FailureStage, NoopObserver};
pub use upstream_exchanger::UpstreamExchanger;
