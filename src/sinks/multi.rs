//! Sink multiplexer
//!
//! Presents an ordered set of sinks as a single write target. A record
//! counts as delivered when every sink has taken it; one sink failing must
//! not stop delivery to the rest.

use crate::config::SinkConfig;
use crate::core::error::SinkFailure;
use crate::core::{LogRecord, LoggerError, Result};
use crate::sinks::{ConsoleSink, RemoteSink, Sink};

pub struct MultiSink {
    sinks: Vec<Box<dyn Sink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    /// Build the sink set from configuration. An empty configuration yields
    /// a single console sink so logging never silently goes nowhere. Remote
    /// parameters are validated here, before the first write.
    pub fn from_configs(configs: &[SinkConfig]) -> Result<Self> {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::with_capacity(configs.len().max(1));
        for config in configs {
            match config {
                SinkConfig::Console => sinks.push(Box::new(ConsoleSink::new())),
                SinkConfig::Remote(remote) => {
                    sinks.push(Box::new(RemoteSink::new(remote.host.clone(), remote.port)?))
                }
            }
        }
        if sinks.is_empty() {
            sinks.push(Box::new(ConsoleSink::new()));
        }
        Ok(Self { sinks })
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Dispatch one record to every sink. Failures are collected per sink
    /// and reported as one aggregate error after all sinks have been tried;
    /// partial delivery is better than total loss.
    pub fn write(&mut self, record: &LogRecord) -> Result<()> {
        let total = self.sinks.len();
        let mut failures = Vec::new();

        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.append(record) {
                failures.push(SinkFailure {
                    sink: sink.name().to_string(),
                    message: e.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::multi_sink(total, failures))
        }
    }

    /// Flush every sink, aggregating failures the same way as `write`
    pub fn flush(&mut self) -> Result<()> {
        let total = self.sinks.len();
        let mut failures = Vec::new();

        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                failures.push(SinkFailure {
                    sink: sink.name().to_string(),
                    message: e.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::multi_sink(total, failures))
        }
    }
}
