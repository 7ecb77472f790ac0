mod dns_reply;
mod handle_dns_query;

pub use dns_reply::DnsReply;
pub use handle_dns_query::HandleDnsQueryUseCase;
