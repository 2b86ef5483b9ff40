//! Sink configuration and the environment configuration surface
//!
//! The process environment supplies a minimum severity name (`LOG_LEVEL`)
//! and a `+`-delimited sink target list (`LOG_TARGET`, recognizing
//! `console` and `remote`). An absent or empty target list means console
//! only; an unrecognized severity name means `info`.

use crate::core::logger::Logger;
use crate::core::{LoggerError, Result, Severity};

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_TARGET: &str = "LOG_TARGET";

pub const TARGET_CONSOLE: &str = "console";
pub const TARGET_REMOTE: &str = "remote";

const TARGET_DELIMITER: char = '+';

/// Remote collector endpoint. Host and port are required; both are checked
/// when the sink set is built, not at first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,
}

impl RemoteConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// One configured sink. The configuration is a list, not a singleton; any
/// number of remote variants may be active alongside the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkConfig {
    Console,
    Remote(RemoteConfig),
}

/// Resolved logger configuration: the severity threshold plus the ordered
/// sink set. This is the precondition of facade construction.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_severity: Severity,
    pub sinks: Vec<SinkConfig>,
}

impl LoggerConfig {
    /// Console-only configuration at the default threshold
    pub fn new() -> Self {
        Self {
            min_severity: Severity::Info,
            sinks: vec![SinkConfig::Console],
        }
    }

    #[must_use]
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: SinkConfig) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Resolve configuration from the process environment. `remote` supplies
    /// the collector endpoint used when the target list names `remote`;
    /// naming `remote` without an endpoint is a configuration error.
    /// Unrecognized target names are ignored.
    pub fn from_env(remote: Option<RemoteConfig>) -> Result<Self> {
        let min_severity = std::env::var(ENV_LOG_LEVEL)
            .map(|s| Severity::from_name_or_default(&s))
            .unwrap_or_default();

        let target_list = std::env::var(ENV_LOG_TARGET).unwrap_or_default();
        let mut sinks = Vec::new();
        for target in target_list
            .split(TARGET_DELIMITER)
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            match target {
                TARGET_CONSOLE => sinks.push(SinkConfig::Console),
                TARGET_REMOTE => match remote {
                    Some(ref remote) => sinks.push(SinkConfig::Remote(remote.clone())),
                    None => {
                        return Err(LoggerError::config(
                            "LoggerConfig",
                            "remote target named but no remote endpoint configured",
                        ))
                    }
                },
                _ => {}
            }
        }
        if sinks.is_empty() {
            sinks.push(SinkConfig::Console);
        }

        Ok(Self { min_severity, sinks })
    }

    /// Build a logger facade bound to the given service and process
    /// identity. All sink parameters are validated here; a bad remote
    /// endpoint surfaces now, not on the first write.
    pub fn build_logger(
        &self,
        service: impl Into<String>,
        pid: impl Into<String>,
    ) -> Result<Logger> {
        Logger::from_config(self, service, pid)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}
