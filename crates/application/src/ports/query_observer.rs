use hickory_proto::rr::Record;
use relaydns_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;

/// Diagnostic sink for the forwarding path.
///
/// None of these calls affect the protocol outcome; an implementation may
/// drop, reformat or aggregate them freely.
pub trait QueryObserver: Send + Sync {
    fn question_received(&self, client: SocketAddr, query: &DnsQuery);

    fn answer_received(&self, query: &DnsQuery, record: &Record);

    fn resolution_failed(&self, query: &DnsQuery, error: &DomainError);
}
