//! relaydns infrastructure: upstream forwarding over UDP, wire codec glue,
//! and the server-side datagram handler.
pub mod dns;
