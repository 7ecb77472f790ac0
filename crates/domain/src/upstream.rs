use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Default per-exchange upstream timeout.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// The recursive resolver queries are forwarded to.
///
/// Built once from configuration at startup and shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    pub addr: SocketAddr,
    pub timeout: Duration,
}

impl UpstreamEndpoint {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
