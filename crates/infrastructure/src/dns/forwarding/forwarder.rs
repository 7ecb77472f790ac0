use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::UdpTransport;
use async_trait::async_trait;
use relaydns_domain::{DnsQuery, DomainError, UpstreamEndpoint};
use tracing::debug;

/// One request/response exchange with the upstream resolver.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Sends a single-question recursive query to `endpoint`.
    ///
    /// `Ok(None)` means the exchange completed but upstream sent back nothing
    /// to decode. A reply that fails to decode is an `InvalidDnsResponse`
    /// error, never a partially filled response.
    async fn exchange(
        &self,
        endpoint: &UpstreamEndpoint,
        query: &DnsQuery,
    ) -> Result<Option<DnsResponse>, DomainError>;
}

/// Plain UDP upstream client. Stateless: every exchange uses a fresh socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpUpstreamClient;

impl UdpUpstreamClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UpstreamClient for UdpUpstreamClient {
    async fn exchange(
        &self,
        endpoint: &UpstreamEndpoint,
        query: &DnsQuery,
    ) -> Result<Option<DnsResponse>, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query_with_id(query)?;

        let transport = UdpTransport::new(endpoint.addr);
        let response_bytes = transport.send(&request_bytes, endpoint.timeout).await?;

        if response_bytes.is_empty() {
            debug!(id, server = %endpoint, "Upstream returned an empty datagram");
            return Ok(None);
        }

        ResponseParser::parse(&response_bytes).map(Some)
    }
}
