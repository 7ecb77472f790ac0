use relaydns_application::ports::QueryObserver;
use relaydns_application::use_cases::HandleDnsQueryUseCase;
use relaydns_domain::{Config, UpstreamEndpoint};
use relaydns_infrastructure::dns::{
    DnsServerHandler, ForwardResolver, TracingQueryObserver, UdpUpstreamClient,
};
use std::sync::Arc;
use tracing::{debug, info};

pub struct DnsServices {
    pub resolver: Arc<ForwardResolver>,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let endpoint = resolve_upstream(config).await?;

        let observer: Arc<dyn QueryObserver> = Arc::new(TracingQueryObserver::new());

        let resolver = Arc::new(ForwardResolver::new(
            endpoint,
            Arc::new(UdpUpstreamClient::new()),
            observer.clone(),
        ));

        let handler_use_case = Arc::new(
            HandleDnsQueryUseCase::new(resolver.clone(), observer)
                .with_authoritative(config.dns.authoritative_replies)
                .with_parallel_questions(config.dns.parallel_questions),
        );

        Ok(Self {
            resolver,
            handler_use_case,
        })
    }

    pub fn server_handler(&self) -> DnsServerHandler {
        DnsServerHandler::new(self.handler_use_case.clone())
    }
}

/// Turns `dns.upstream` into a fixed endpoint. Host names are looked up once
/// here and the first address is kept for the life of the process.
async fn resolve_upstream(config: &Config) -> anyhow::Result<UpstreamEndpoint> {
    let upstream = config.dns.upstream.as_str();

    let addr = tokio::net::lookup_host(upstream)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve upstream '{}': {}", upstream, e))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Upstream '{}' resolved to no addresses", upstream))?;

    debug!(upstream, resolved = %addr, "Upstream address resolved");

    Ok(UpstreamEndpoint::new(addr, config.upstream_timeout()))
}
