use crate::upstream::DEFAULT_UPSTREAM_TIMEOUT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream recursive resolver, `ip:port` or `host:port`.
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Per-exchange upstream timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Sets the AA bit on replies.
    ///
    /// A forwarder is not authoritative for anything it relays, but clients
    /// built against the original service expect the bit, so it stays on unless
    /// explicitly disabled.
    #[serde(default = "default_true")]
    pub authoritative_replies: bool,

    /// Resolve the questions of one message concurrently instead of one by one.
    #[serde(default)]
    pub parallel_questions: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            query_timeout_ms: default_query_timeout_ms(),
            authoritative_replies: default_true(),
            parallel_questions: false,
        }
    }
}

fn default_upstream() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout_ms() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT.as_millis() as u64
}

fn default_true() -> bool {
    true
}
