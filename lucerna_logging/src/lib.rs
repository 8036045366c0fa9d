//! On-demand logger provisioning for the Lucerna component registry.
//!
//! Install [`LoggerIntegration`] and a backend, then:
//!
//! - resolve [`Logger`] anywhere for the root category, or
//!   [`LoggerOf<T>`](LoggerOf) for a logger named after `T`, with no
//!   per-type registrations;
//! - declare a plain [`Logger`] constructor parameter on any component and
//!   receive, at construction time, a logger named after the component's
//!   own concrete type.
//!
//! Logger categories are fully-qualified Rust type names, so log output can
//! be filtered and attributed per component.
//!
//! The integration is backend-agnostic: implement [`LoggerProvider`] and
//! [`LogSink`] for the backend of your choice, or use a ready-made bridge
//! such as `lucerna_tracing`.
mod errors;
mod factory;
mod inject;
mod integration;
mod logger;
mod source;
mod typed;

pub use errors::LoggerError;
pub use factory::{LoggerFactory, LoggerProvider};
pub use inject::LoggerInjector;
pub use integration::LoggerIntegration;
pub use logger::{LogLevel, LogRecord, LogSink, Logger};
pub use source::{LoggerRegistrationSource, LoggerRequest};
pub use typed::LoggerOf;
