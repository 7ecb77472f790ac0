use hickory_proto::rr::Record;
use relaydns_application::ports::QueryObserver;
use relaydns_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingObserver {
    questions: Mutex<Vec<String>>,
    answers: Mutex<Vec<Record>>,
    failures: Mutex<Vec<(String, DomainError)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn answers(&self) -> Vec<Record> {
        self.answers.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(String, DomainError)> {
        self.failures.lock().unwrap().clone()
    }
}

impl QueryObserver for RecordingObserver {
    fn question_received(&self, _client: SocketAddr, query: &DnsQuery) {
        self.questions.lock().unwrap().push(query.domain.to_string());
    }

    fn answer_received(&self, _query: &DnsQuery, record: &Record) {
        self.answers.lock().unwrap().push(record.clone());
    }

    fn resolution_failed(&self, query: &DnsQuery, error: &DomainError) {
        self.failures
            .lock()
            .unwrap()
            .push((query.domain.to_string(), error.clone()));
    }
}
