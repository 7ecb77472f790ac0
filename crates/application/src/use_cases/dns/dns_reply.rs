use hickory_proto::rr::Record;

/// The reply assembled for one inbound request.
#[derive(Debug, Clone)]
pub struct DnsReply {
    /// Always the transaction id of the request being answered.
    pub id: u16,
    pub authoritative: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// Answers of every question that resolved, grouped in question order.
    pub answers: Vec<Record>,
}

impl DnsReply {
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}
