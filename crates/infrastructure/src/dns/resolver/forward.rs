use crate::dns::forwarding::{ResponseParser, UpstreamClient};
use async_trait::async_trait;
use relaydns_application::ports::{DnsResolution, DnsResolver, QueryObserver};
use relaydns_domain::{DnsQuery, DomainError, UpstreamEndpoint};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves each question with exactly one exchange against a fixed upstream.
pub struct ForwardResolver {
    endpoint: UpstreamEndpoint,
    client: Arc<dyn UpstreamClient>,
    observer: Arc<dyn QueryObserver>,
}

impl ForwardResolver {
    pub fn new(
        endpoint: UpstreamEndpoint,
        client: Arc<dyn UpstreamClient>,
        observer: Arc<dyn QueryObserver>,
    ) -> Self {
        info!(
            upstream = %endpoint.addr,
            timeout_ms = endpoint.timeout.as_millis() as u64,
            "Forward resolver created"
        );

        Self {
            endpoint,
            client,
            observer,
        }
    }

    pub fn endpoint(&self) -> &UpstreamEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl DnsResolver for ForwardResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            upstream = %self.endpoint,
            "Forwarding question upstream"
        );

        let response = match self.client.exchange(&self.endpoint, query).await? {
            Some(response) => response,
            None => {
                warn!(
                    domain = %query.domain,
                    upstream = %self.endpoint,
                    "Empty response from upstream"
                );
                return Err(DomainError::EmptyUpstreamResponse {
                    server: self.endpoint.to_string(),
                });
            }
        };

        if response.is_nxdomain() {
            debug!(
                domain = %query.domain,
                upstream = %self.endpoint,
                "Upstream reported NXDOMAIN"
            );
        } else if response.is_server_error() || response.truncated {
            debug!(
                domain = %query.domain,
                rcode = ResponseParser::rcode_to_status(response.rcode),
                truncated = response.truncated,
                answers = response.answers.len(),
                "Upstream response passed through as-is"
            );
        }

        for record in &response.answers {
            self.observer.answer_received(query, record);
        }

        Ok(DnsResolution::new(response.answers))
    }
}
