#![allow(dead_code)]
mod dns_server_mock;
mod observers;
mod records;

pub use dns_server_mock::{MockDnsServer, UpstreamBehavior};
pub use observers::RecordingObserver;
pub use records::{a_record, mx_record, query_bytes, use_case_for};
