//! DNS Message Builder
//!
//! Constructs the wire messages relaydns emits: single-question recursive
//! queries towards the upstream, and replies towards clients.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use relaydns_application::use_cases::DnsReply;
use relaydns_domain::{DnsQuery, DomainError};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a DNS query message and serialize to wire format bytes
    ///
    /// Creates a standard recursive query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag set
    /// - Single question, name made fully-qualified, class IN
    pub fn build_query(query: &DnsQuery) -> Result<Vec<u8>, DomainError> {
        Self::build_query_with_id(query).map(|(_, bytes)| bytes)
    }

    /// Same as [`build_query`](Self::build_query), also returning the id used.
    pub fn build_query_with_id(query: &DnsQuery) -> Result<(u16, Vec<u8>), DomainError> {
        let fqdn = query.fqdn();
        let name = Name::from_str(&fqdn).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", fqdn, e))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(RecordTypeMapper::to_hickory(&query.record_type));
        question.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(question);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Build the reply to `request` carrying the assembled answers.
    ///
    /// The question section is echoed from the request.
    pub fn build_reply(request: &Message, reply: &DnsReply) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new(reply.id, MessageType::Response, request.op_code());
        message.set_authoritative(reply.authoritative);
        message.set_recursion_desired(reply.recursion_desired);
        message.set_recursion_available(reply.recursion_available);
        message.add_queries(request.queries().to_vec());
        message.add_answers(reply.answers.iter().cloned());

        Self::serialize_message(&message)
    }

    /// Build an answerless reply carrying only a response code.
    pub fn build_error_reply(
        id: u16,
        op_code: OpCode,
        code: ResponseCode,
    ) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new(id, MessageType::Response, op_code);
        message.set_response_code(code);

        Self::serialize_message(&message)
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
