use async_trait::async_trait;
use hickory_proto::rr::Record;
use relaydns_application::ports::{DnsResolution, DnsResolver, QueryObserver};
use relaydns_domain::{DnsQuery, DomainError};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// Resolver double keyed by domain name.
///
/// Unknown names resolve to an empty answer set, like a NODATA upstream.
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, Result<DnsResolution, DomainError>>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<Mutex<Vec<DnsQuery>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_answers(&self, domain: &str, answers: Vec<Record>) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), Ok(DnsResolution::new(answers)));
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), Err(error));
    }

    pub fn set_delay(&self, domain: &str, delay: Duration) {
        self.delays
            .write()
            .unwrap()
            .insert(domain.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<DnsQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.calls.lock().unwrap().push(query.clone());

        let delay = self.delays.read().unwrap().get(&*query.domain).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .unwrap()
            .get(&*query.domain)
            .cloned()
            .unwrap_or_else(|| Ok(DnsResolution::default()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Question(String),
    Answer(String),
    Failure(String, DomainError),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(String, DomainError)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Failure(domain, err) => Some((domain, err)),
                _ => None,
            })
            .collect()
    }
}

impl QueryObserver for RecordingObserver {
    fn question_received(&self, _client: SocketAddr, query: &DnsQuery) {
        self.events
            .lock()
            .unwrap()
            .push(ObservedEvent::Question(query.domain.to_string()));
    }

    fn answer_received(&self, query: &DnsQuery, _record: &Record) {
        self.events
            .lock()
            .unwrap()
            .push(ObservedEvent::Answer(query.domain.to_string()));
    }

    fn resolution_failed(&self, query: &DnsQuery, error: &DomainError) {
        self.events
            .lock()
            .unwrap()
            .push(ObservedEvent::Failure(query.domain.to_string(), error.clone()));
    }
}
