use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::BinEncodable;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream treats queries for one name.
#[derive(Debug, Clone)]
pub enum UpstreamBehavior {
    Answer(Vec<Record>),
    Rcode(ResponseCode),
    Silent,
    EmptyDatagram,
    Garbage,
    /// Only replies carrying a transaction id other than the query's.
    WrongId,
    /// A reply with a foreign transaction id, then the real answer.
    WrongIdThenAnswer(Vec<Record>),
}

/// Loopback UDP upstream. Names without a configured behavior get NOERROR
/// with no answers.
pub struct MockDnsServer {
    addr: SocketAddr,
    behaviors: Arc<RwLock<HashMap<String, UpstreamBehavior>>>,
    queries_seen: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let behaviors: Arc<RwLock<HashMap<String, UpstreamBehavior>>> =
            Arc::new(RwLock::new(HashMap::new()));
        let queries_seen = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_behaviors = behaviors.clone();
        let task_seen = queries_seen.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        task_seen.fetch_add(1, Ordering::SeqCst);

                        for reply in Self::build_replies(&buf[..len], &task_behaviors) {
                            let _ = socket.send_to(&reply, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            behaviors,
            queries_seen,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `name` is matched against the fully-qualified question name.
    pub fn set(&self, name: &str, behavior: UpstreamBehavior) {
        self.behaviors
            .write()
            .unwrap()
            .insert(name.to_string(), behavior);
    }

    pub fn queries_seen(&self) -> usize {
        self.queries_seen.load(Ordering::SeqCst)
    }

    fn build_replies(
        query: &[u8],
        behaviors: &RwLock<HashMap<String, UpstreamBehavior>>,
    ) -> Vec<Vec<u8>> {
        let Ok(request) = Message::from_vec(query) else {
            return vec![];
        };
        let Some(question) = request.queries().first().cloned() else {
            return vec![];
        };

        let behavior = behaviors
            .read()
            .unwrap()
            .get(&question.name().to_utf8())
            .cloned()
            .unwrap_or(UpstreamBehavior::Answer(vec![]));

        let response = |id: u16, records: Vec<Record>, code: ResponseCode| {
            let mut response = Message::new(id, MessageType::Response, OpCode::Query);
            response.set_recursion_desired(request.recursion_desired());
            response.set_recursion_available(true);
            response.set_response_code(code);
            response.add_query(question.clone());
            response.add_answers(records);
            response.to_vec().unwrap()
        };
        let foreign_id = request.id().wrapping_add(1);

        match behavior {
            UpstreamBehavior::Answer(records) => {
                vec![response(request.id(), records, ResponseCode::NoError)]
            }
            UpstreamBehavior::Rcode(code) => vec![response(request.id(), vec![], code)],
            UpstreamBehavior::Silent => vec![],
            UpstreamBehavior::EmptyDatagram => vec![vec![]],
            UpstreamBehavior::Garbage => {
                let mut garbage = query[..2].to_vec();
                garbage.extend_from_slice(&[0x81, 0x80, 0xFF]);
                vec![garbage]
            }
            UpstreamBehavior::WrongId => {
                vec![response(foreign_id, vec![], ResponseCode::NoError)]
            }
            UpstreamBehavior::WrongIdThenAnswer(records) => vec![
                response(foreign_id, vec![], ResponseCode::NoError),
                response(request.id(), records, ResponseCode::NoError),
            ],
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
