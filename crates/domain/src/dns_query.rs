use super::RecordType;
use std::sync::Arc;

/// A single question: (name, type). Class is always IN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// The question name in fully-qualified form, as sent upstream.
    pub fn fqdn(&self) -> String {
        fqdn(&self.domain)
    }
}

/// Returns `name` with a trailing root label, adding one if missing.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
