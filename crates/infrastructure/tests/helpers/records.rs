use super::RecordingObserver;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use relaydns_application::use_cases::HandleDnsQueryUseCase;
use relaydns_domain::UpstreamEndpoint;
use relaydns_infrastructure::dns::{ForwardResolver, UdpUpstreamClient};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub fn a_record(name: &str, ip: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::A(A(ip)))
}

pub fn mx_record(name: &str, preference: u16, exchange: &str, ttl: u32) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        ttl,
        RData::MX(MX::new(preference, Name::from_str(exchange).unwrap())),
    )
}

/// Client query datagram with the given id and questions, RD set.
pub fn query_bytes(id: u16, questions: &[(&str, RecordType)]) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    for (name, rt) in questions {
        message.add_query(Query::query(Name::from_str(name).unwrap(), *rt));
    }
    message.to_vec().unwrap()
}

/// Real resolver + UDP client pointed at `upstream`, wrapped in the handler.
pub fn use_case_for(
    upstream: SocketAddr,
    timeout: Duration,
    observer: Arc<RecordingObserver>,
) -> HandleDnsQueryUseCase {
    let resolver = ForwardResolver::new(
        UpstreamEndpoint::new(upstream, timeout),
        Arc::new(UdpUpstreamClient::new()),
        observer.clone(),
    );
    HandleDnsQueryUseCase::new(Arc::new(resolver), observer)
}
