use super::DnsReply;
use crate::ports::{DnsResolution, DnsResolver, QueryObserver};
use futures::future::join_all;
use relaydns_domain::{DnsQuery, DnsRequest, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Turns one inbound request into one reply.
///
/// Each question is resolved independently; a failed question contributes no
/// answers and never prevents the others from being answered.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    observer: Arc<dyn QueryObserver>,
    authoritative: bool,
    parallel_questions: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, observer: Arc<dyn QueryObserver>) -> Self {
        Self {
            resolver,
            observer,
            authoritative: true,
            parallel_questions: false,
        }
    }

    pub fn with_authoritative(mut self, authoritative: bool) -> Self {
        self.authoritative = authoritative;
        self
    }

    pub fn with_parallel_questions(mut self, parallel: bool) -> Self {
        self.parallel_questions = parallel;
        self
    }

    pub async fn execute(&self, request: &DnsRequest) -> DnsReply {
        let start = Instant::now();

        for query in &request.questions {
            self.observer.question_received(request.client, query);
        }

        let outcomes = if self.parallel_questions {
            // join_all yields results in input order, not completion order
            join_all(request.questions.iter().map(|q| self.resolver.resolve(q))).await
        } else {
            let mut outcomes = Vec::with_capacity(request.questions.len());
            for query in &request.questions {
                outcomes.push(self.resolver.resolve(query).await);
            }
            outcomes
        };

        let answers = self.collect_answers(&request.questions, outcomes);

        debug!(
            id = request.id,
            client = %request.client,
            questions = request.questions.len(),
            answers = answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Reply assembled"
        );

        DnsReply {
            id: request.id,
            authoritative: self.authoritative,
            recursion_desired: request.recursion_desired,
            recursion_available: true,
            answers,
        }
    }

    fn collect_answers(
        &self,
        questions: &[DnsQuery],
        outcomes: Vec<Result<DnsResolution, DomainError>>,
    ) -> Vec<hickory_proto::rr::Record> {
        let mut answers = Vec::new();

        for (query, outcome) in questions.iter().zip(outcomes) {
            match outcome {
                Ok(resolution) => {
                    if resolution.is_empty() {
                        debug!(
                            domain = %query.domain,
                            record_type = %query.record_type,
                            "No answers"
                        );
                    }
                    answers.extend(resolution.answers);
                }
                Err(e) => self.observer.resolution_failed(query, &e),
            }
        }

        answers
    }
}
