//! UDP transport for upstream DNS exchanges (RFC 1035 §4.2.1)
//!
//! One ephemeral socket per exchange, connected to the upstream so that only
//! its datagrams are accepted. Messages are sent as-is (no framing). The
//! whole send/receive round trip is bounded by a single deadline.

use relaydns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest datagram accepted from upstream.
const MAX_UDP_RESPONSE_SIZE: usize = 65535;

/// DNS over UDP transport
#[derive(Debug, Clone, Copy)]
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Sends `message_bytes` and waits for one reply datagram.
    ///
    /// Returns the first reply whose transaction id matches the query. A
    /// zero-length reply is returned as an empty buffer rather than an error;
    /// callers decide what an empty reply means.
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })?
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr.to_string();

        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| DomainError::from_io(&e, &server))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| DomainError::from_io(&e, &server))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        // Datagrams carrying another transaction id are skipped; the caller's
        // deadline bounds how long we keep reading.
        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| DomainError::from_io(&e, &server))?;

            debug!(server = %self.server_addr, bytes_received, "UDP response received");

            let response = &recv_buf[..bytes_received];
            if response.is_empty()
                || response_id_matches(message_bytes, response, self.server_addr)?
            {
                return Ok(response.to_vec());
            }
        }
    }
}

/// Whether `response` carries the transaction id of `query`.
///
/// A message too short to carry an id is an `InvalidDnsResponse`.
pub(crate) fn response_id_matches(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<bool, DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::InvalidDnsResponse(format!(
            "Message from {} too short to carry an id",
            server
        )));
    }

    let query_id = u16::from_be_bytes([query[0], query[1]]);
    let response_id = u16::from_be_bytes([response[0], response[1]]);

    if query_id != response_id {
        debug!(
            server = %server,
            sent = query_id,
            got = response_id,
            "Discarding reply with mismatched transaction id"
        );
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod udp_test;
