mod dns_resolver;
mod query_observer;

pub use dns_resolver::{DnsResolution, DnsResolver};
pub use query_observer::QueryObserver;

// Re-export for convenience
pub use relaydns_domain::DnsQuery;
