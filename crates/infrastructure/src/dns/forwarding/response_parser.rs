use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use relaydns_domain::DomainError;
use tracing::debug;

/// A fully decoded upstream response.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Answer section, in the order upstream sent it.
    pub answers: Vec<Record>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode an upstream reply. Fails with `InvalidDnsResponse` rather than
    /// returning anything partially decoded.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Upstream sent a query instead of a response".to_string(),
            ));
        }

        let rcode = message.response_code();
        let truncated = message.truncated();
        let answers = message.answers().to_vec();

        debug!(
            id = message.id(),
            rcode = Self::rcode_to_status(rcode),
            answers = answers.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            answers,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
