use serde::{Deserialize, Serialize};

/// Smallest payload every DNS implementation must accept (RFC 1035 §2.3.4).
pub const MIN_UDP_PAYLOAD: usize = 512;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Receive buffer for inbound datagrams, in bytes.
    #[serde(default = "default_max_udp_payload")]
    pub max_udp_payload: usize,
}

impl ServerConfig {
    pub fn listen_address(&self) -> String {
        if self.bind_address.contains(':') && !self.bind_address.starts_with('[') {
            format!("[{}]:{}", self.bind_address, self.dns_port)
        } else {
            format!("{}:{}", self.bind_address, self.dns_port)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            max_udp_payload: default_max_udp_payload(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_max_udp_payload() -> usize {
    65535
}
