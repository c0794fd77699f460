use clap::Parser;
use dns_intercept_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dns-intercept")]
#[command(version)]
#[command(about = "DNS responder that answers one domain locally and forwards the rest")]
struct Cli {
    /// Address returned for A queries under the intercept domain
    #[arg(value_name = "LOCAL_IP")]
    local_ip: Option<String>,

    /// Domain suffix answered locally (e.g. test.local)
    #[arg(value_name = "INTERCEPT_DOMAIN")]
    intercept_domain: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Upstream resolver (ip:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Upstream exchange timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        local_address: cli.local_ip,
        intercept_domain: cli.intercept_domain,
        bind_address: cli.bind,
        dns_port: cli.dns_port,
        upstream: cli.upstream,
        timeout_ms: cli.timeout_ms,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting DNS Intercept v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;
    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
        }
        signal_token.cancel();
    });

    let dns_addr = config.server.listen_address();
    server::start_dns_server(&dns_addr, services.handler, shutdown).await?;

    let stats = services.metrics.snapshot();
    info!(
        questions = stats.questions_seen,
        intercepted = stats.intercepted,
        intercepted_empty = stats.intercepted_empty,
        forward_attempts = stats.forward_attempts,
        relayed = stats.relayed(),
        failed = stats.failed(),
        "Server shutdown complete"
    );
    for (name, count) in services.metrics.top_intercepted(5) {
        info!(domain = %name, count, "Top intercepted name");
    }

    Ok(())
}
