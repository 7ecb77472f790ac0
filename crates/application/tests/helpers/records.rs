use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record};
use relaydns_domain::{DnsQuery, DnsRequest, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

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

pub fn request(id: u16, questions: &[(&str, RecordType)]) -> DnsRequest {
    let client: SocketAddr = "192.168.1.100:40000".parse().unwrap();
    DnsRequest::new(
        id,
        true,
        questions
            .iter()
            .map(|(name, rt)| DnsQuery::new(*name, *rt))
            .collect(),
        client,
    )
}
