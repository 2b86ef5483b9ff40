//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

/// A single sink's failure inside a multiplexed write
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: String,
    pub message: String,
}

impl std::fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.sink, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details, surfaced at construction time
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Malformed record bytes handed to the remote sink adapter
    #[error("malformed record: {0}")]
    Decode(#[source] serde_json::Error),

    /// A decoded record is missing a required field, or the field has the wrong shape
    #[error("record field '{field}': {message}")]
    Schema { field: String, message: String },

    /// Connection or push failure against the remote collector
    #[error("remote sink {address}: {message}")]
    RemoteSink { address: String, message: String },

    /// One or more sinks failed during a single multiplexed write
    #[error("{} of {total} sinks failed: {}", .failures.len(), format_failures(.failures))]
    MultiSink {
        total: usize,
        failures: Vec<SinkFailure>,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn format_failures(failures: &[SinkFailure]) -> String {
    failures
        .iter()
        .map(SinkFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a schema error for a required record field
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Schema {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a remote sink error
    pub fn remote_sink(address: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::RemoteSink {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Create an aggregate error from per-sink failures
    pub fn multi_sink(total: usize, failures: Vec<SinkFailure>) -> Self {
        LoggerError::MultiSink { total, failures }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Names of the sinks that failed, if this is an aggregate error
    pub fn failed_sinks(&self) -> Vec<&str> {
        match self {
            LoggerError::MultiSink { failures, .. } => {
                failures.iter().map(|f| f.sink.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}
