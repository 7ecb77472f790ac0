#![allow(dead_code)]
mod mock_ports;
mod records;

pub use mock_ports::{MockDnsResolver, ObservedEvent, RecordingObserver};
pub use records::{a_record, mx_record, request};
