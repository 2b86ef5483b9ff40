//! # Fanlog
//!
//! A structured logging facade that fans each log record out to a
//! configurable set of sinks behind one uniform interface.
//!
//! ## Features
//!
//! - **Sink Fan-Out**: One write, every configured sink (console, remote
//!   collector), with per-sink failure isolation
//! - **Remote Collector**: Records become tagged, timestamped events for a
//!   push-based log collector
//! - **Request Scoped**: A configured logger rides generic scope contexts
//!   and HTTP requests, no global state
//! - **Thread Safe**: A built facade is immutable and shareable across
//!   threads

pub mod config;
pub mod context;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{LoggerConfig, RemoteConfig, SinkConfig};
    pub use crate::context::{attach, retrieve, LoggerCarrier, ScopeContext};
    pub use crate::core::{
        source_chain, FieldValue, LogRecord, Logger, LoggerBuilder, LoggerError, RawWriter,
        RecordFields, Result, Severity, SeverityGate, SinkFailure,
    };
    pub use crate::sinks::{ConsoleSink, MultiSink, RemoteSink, Sink};
}

pub use crate::config::{LoggerConfig, RemoteConfig, SinkConfig};
pub use crate::context::{attach, retrieve, LoggerCarrier, ScopeContext};
pub use crate::core::{
    source_chain, FieldValue, LogRecord, Logger, LoggerBuilder, LoggerError, RawWriter,
    RecordFields, Result, Severity, SeverityGate, SinkFailure,
};
pub use crate::sinks::{ConsoleSink, MultiSink, RemoteSink, Sink};
