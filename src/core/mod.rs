//! Core types: records, severities, errors, and the logger facade

pub mod error;
pub mod fields;
pub mod logger;
pub mod record;
pub mod severity;

pub use error::{LoggerError, Result, SinkFailure};
pub use fields::{FieldValue, RecordFields};
pub use logger::{Logger, LoggerBuilder, RawWriter};
pub use record::{source_chain, LogRecord};
pub use severity::{Severity, SeverityGate};
