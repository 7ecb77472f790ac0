mod forward;

pub use forward::ForwardResolver;
