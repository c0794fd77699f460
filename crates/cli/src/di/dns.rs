use dns_intercept_application::use_cases::DispatchQueryUseCase;
use dns_intercept_domain::Config;
use dns_intercept_infrastructure::dns::{
    DispatchMetrics, DnsServerHandler, ObserverChain, TracingObserver, UdpTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
    pub metrics: Arc<DispatchMetrics>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let rule = Arc::new(config.intercept_rule()?);
        let upstream_addr = config.upstream_addr()?;
        let timeout = Duration::from_millis(config.upstream.timeout_ms);

        info!(
            local_address = %rule.local_address(),
            domain = %rule.domain(),
            upstream = %upstream_addr,
            timeout_ms = config.upstream.timeout_ms,
            "Initializing DNS services"
        );

        let metrics = Arc::new(DispatchMetrics::new());
        let observer = ObserverChain::new()
            .with(Arc::new(TracingObserver))
            .with(metrics.clone());

        let use_case = DispatchQueryUseCase::new(
            rule,
            Arc::new(UdpTransport::new(upstream_addr, timeout)),
        )
        .with_observer(Arc::new(observer));

        Ok(Self {
            handler: DnsServerHandler::new(Arc::new(use_case)),
            metrics,
        })
    }
}
