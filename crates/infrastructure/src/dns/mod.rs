pub mod forwarding;
pub mod query_logger;
pub mod resolver;
pub mod server;
pub mod transport;

pub use forwarding::{UdpUpstreamClient, UpstreamClient};
pub use query_logger::TracingQueryObserver;
pub use resolver::ForwardResolver;
pub use server::DnsServerHandler;
