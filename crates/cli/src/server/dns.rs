use relaydns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

/// Bind the listener and serve until the socket fails.
///
/// A bind failure is returned to the caller; nothing is served in that case.
pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    max_udp_payload: usize,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address '{}': {}", bind_addr, e))?;

    let socket = create_udp_socket(socket_addr)
        .map_err(|e| anyhow::anyhow!("Failed to listen on {}: {}", socket_addr, e))?;

    info!(bind_address = %socket_addr, "DNS server listening");

    run_udp_listener(Arc::new(socket), Arc::new(handler), max_udp_payload).await
}

/// Receive loop. Every datagram is handled on its own task so a slow
/// upstream never blocks other clients.
pub(crate) async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    max_udp_payload: usize,
) -> anyhow::Result<()> {
    let mut recv_buf = vec![0u8; max_udp_payload];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "Transient UDP recv error");
                continue;
            }
            Err(e) => {
                error!(error = %e, "UDP recv error");
                return Err(e.into());
            }
        };

        let query_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw_udp(&query_buf, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    warn!(client = %from, error = %e, "Failed to send reply");
                }
            }
        });
    }
}

// ICMP port-unreachable from an earlier send_to surfaces as ConnectionReset
// on some platforms.
fn is_transient(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::Interrupted
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionRefused
    )
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
