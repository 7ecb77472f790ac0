use clap::Parser;
use relaydns_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "relaydns")]
#[command(version)]
#[command(about = "relaydns - forwarding DNS resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

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
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        upstream: cli.upstream.clone(),
        query_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting relaydns v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config_summary(&config);

    let dns_services = di::DnsServices::new(&config).await?;
    info!(upstream = %dns_services.resolver.endpoint(), "Forwarding to upstream");

    let dns_addr = config.server.listen_address();
    let dns_handler = dns_services.server_handler();

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_handler, config.server.max_udp_payload) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
