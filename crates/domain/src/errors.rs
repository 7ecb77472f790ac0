use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Empty response from upstream {server}")]
    EmptyUpstreamResponse { server: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },
}

impl DomainError {
    /// The upstream exchange failed at the network layer.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::IoError(_)
                | Self::TransportTimeout { .. }
                | Self::TransportConnectionRefused { .. }
                | Self::TransportConnectionReset { .. }
        )
    }

    /// The upstream answered, but with nothing usable.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDnsResponse(_) | Self::EmptyUpstreamResponse { .. }
        )
    }

    /// Maps a socket error into the transport taxonomy.
    pub fn from_io(error: &std::io::Error, server: impl Into<String>) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => Self::TransportTimeout {
                server: server.into(),
            },
            ErrorKind::ConnectionRefused => Self::TransportConnectionRefused {
                server: server.into(),
            },
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
                Self::TransportConnectionReset {
                    server: server.into(),
                }
            }
            _ => Self::IoError(format!("{}: {}", server.into(), error)),
        }
    }
}
