//! The official integration between [`tracing`] and the Lucerna component
//! registry.
//!
//! Installing [`TracingLogging`] gives every component the full logger
//! provisioning surface of `lucerna_logging`, with records flowing into
//! whatever `tracing` subscriber the application has set up.
//!
//! [`tracing`]: https://docs.rs/tracing/0.1.44/tracing
mod backend;

pub use backend::{TracingLoggerProvider, TracingLogging};
