use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use relaydns_application::use_cases::HandleDnsQueryUseCase;
use relaydns_domain::{DnsQuery, DnsRequest};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Bytes-in, bytes-out adapter between the UDP listener and the query handler.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Handles one inbound datagram and returns the datagram to send back, if
    /// any. `None` means the datagram is dropped without a reply.
    pub async fn handle_raw_udp(&self, query_buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let message = match Message::from_vec(query_buf) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client, error = %e, "Failed to decode DNS request");
                return formerr_for_raw_header(query_buf);
            }
        };

        if message.message_type() == MessageType::Response {
            debug!(client = %client, id = message.id(), "Ignoring DNS response sent to listener");
            return None;
        }

        if message.op_code() != OpCode::Query {
            debug!(client = %client, op_code = ?message.op_code(), "Unsupported opcode");
            return encode_or_log(MessageBuilder::build_error_reply(
                message.id(),
                message.op_code(),
                ResponseCode::NotImp,
            ));
        }

        let request = to_request(&message, client);
        let reply = self.use_case.execute(&request).await;

        match MessageBuilder::build_reply(&message, &reply) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, id = reply.id, error = %e, "Failed to encode reply");
                encode_or_log(MessageBuilder::build_error_reply(
                    reply.id,
                    OpCode::Query,
                    ResponseCode::ServFail,
                ))
            }
        }
    }
}

fn to_request(message: &Message, client: SocketAddr) -> DnsRequest {
    let questions = message
        .queries()
        .iter()
        .map(|q| {
            DnsQuery::new(
                q.name().to_utf8(),
                RecordTypeMapper::from_hickory(q.query_type()),
            )
        })
        .collect();

    DnsRequest::new(message.id(), message.recursion_desired(), questions, client)
}

/// FORMERR for a datagram whose header is readable but whose body is not.
/// Anything too short to carry an id, or flagged as a response, gets no reply.
fn formerr_for_raw_header(query_buf: &[u8]) -> Option<Vec<u8>> {
    const HEADER_LEN: usize = 12;
    const QR_BIT: u8 = 0x80;

    if query_buf.len() < HEADER_LEN || query_buf[2] & QR_BIT != 0 {
        return None;
    }

    let id = u16::from_be_bytes([query_buf[0], query_buf[1]]);
    encode_or_log(MessageBuilder::build_error_reply(
        id,
        OpCode::Query,
        ResponseCode::FormErr,
    ))
}

fn encode_or_log(result: Result<Vec<u8>, relaydns_domain::DomainError>) -> Option<Vec<u8>> {
    result
        .map_err(|e| error!(error = %e, "Failed to encode error reply"))
        .ok()
}
