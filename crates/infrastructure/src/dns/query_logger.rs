use hickory_proto::rr::Record;
use relaydns_application::ports::QueryObserver;
use relaydns_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use tracing::{error, info};

/// Emits forwarding diagnostics as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingQueryObserver;

impl TracingQueryObserver {
    pub fn new() -> Self {
        Self
    }
}

impl QueryObserver for TracingQueryObserver {
    fn question_received(&self, client: SocketAddr, query: &DnsQuery) {
        info!(
            domain = %query.domain,
            record_type = %query.record_type,
            client = %client,
            "Question"
        );
    }

    fn answer_received(&self, query: &DnsQuery, record: &Record) {
        info!(domain = %query.domain, answer = %record, "Answer");
    }

    fn resolution_failed(&self, query: &DnsQuery, error: &DomainError) {
        error!(
            domain = %query.domain,
            record_type = %query.record_type,
            error = %error,
            "Failed to resolve"
        );
    }
}
