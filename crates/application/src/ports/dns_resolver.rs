use async_trait::async_trait;
use hickory_proto::rr::Record;
use relaydns_domain::{DnsQuery, DomainError};

#[derive(Debug, Clone, Default)]
pub struct DnsResolution {
    /// Answer section of the upstream response, in upstream order.
    /// Empty for NXDOMAIN / NODATA.
    pub answers: Vec<Record>,
}

impl DnsResolution {
    pub fn new(answers: Vec<Record>) -> Self {
        Self { answers }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve one question. An `Err` means "no answer for this question";
    /// callers must not treat it as fatal to the surrounding exchange.
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;
}
