use super::DnsQuery;
use std::net::SocketAddr;

/// An inbound query message, decoded from one client datagram.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub id: u16,
    pub recursion_desired: bool,
    /// Questions in wire order. Answers are assembled in this order.
    pub questions: Vec<DnsQuery>,
    pub client: SocketAddr,
}

impl DnsRequest {
    pub fn new(
        id: u16,
        recursion_desired: bool,
        questions: Vec<DnsQuery>,
        client: SocketAddr,
    ) -> Self {
        Self {
            id,
            recursion_desired,
            questions,
            client,
        }
    }
}
