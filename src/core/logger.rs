//! The logger facade
//!
//! One facade instance owns its sink set and its bound identity (service,
//! pid). Nothing here is global: multiple facades with different sink sets
//! can coexist, and a facade is immutable once built, so it can be shared
//! across threads behind an `Arc` without further locking.

use crate::config::LoggerConfig;
use crate::core::record::source_chain;
use crate::core::{LogRecord, RecordFields, Result, Severity, SeverityGate};
use crate::sinks::{ConsoleSink, MultiSink, Sink};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct Logger {
    service: String,
    pid: String,
    gate: SeverityGate,
    sinks: RwLock<MultiSink>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("service", &self.service)
            .field("pid", &self.pid)
            .field("threshold", &self.gate.threshold())
            .field("sinks", &self.sinks.read().sink_names())
            .finish()
    }
}

impl Logger {
    /// Build a facade from resolved configuration. Every sink parameter is
    /// validated here; construction errors are never silently defaulted.
    pub fn from_config(
        config: &LoggerConfig,
        service: impl Into<String>,
        pid: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            service: service.into(),
            pid: pid.into(),
            gate: SeverityGate::new(config.min_severity),
            sinks: RwLock::new(MultiSink::from_configs(&config.sinks)?),
        })
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn pid(&self) -> &str {
        &self.pid
    }

    pub fn threshold(&self) -> Severity {
        self.gate.threshold()
    }

    /// Gate, build, multiplex. Suppressed calls return before any record is
    /// constructed, so they cost neither serialization nor network work.
    pub fn log(&self, level: Severity, message: impl Into<String>) {
        if !self.gate.should_log(level) {
            return;
        }
        let record = LogRecord::new(level, self.service.as_str(), self.pid.as_str(), message);
        self.dispatch(record);
    }

    /// Log with per-call structured fields
    pub fn log_with_fields(
        &self,
        level: Severity,
        message: impl Into<String>,
        fields: RecordFields,
    ) {
        if !self.gate.should_log(level) {
            return;
        }
        let record = LogRecord::new(level, self.service.as_str(), self.pid.as_str(), message)
            .with_fields(fields);
        self.dispatch(record);
    }

    fn dispatch(&self, record: LogRecord) {
        if let Err(e) = self.sinks.write().write(&record) {
            eprintln!("[LOGGER ERROR] {}", e);
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    /// Log an error object at warn severity, attaching its source chain
    pub fn warn_cause(&self, err: &(dyn std::error::Error + 'static)) {
        self.log_cause(Severity::Warn, err);
    }

    /// Log an error object at error severity, attaching its source chain
    pub fn error_cause(&self, err: &(dyn std::error::Error + 'static)) {
        self.log_cause(Severity::Error, err);
    }

    fn log_cause(&self, level: Severity, err: &(dyn std::error::Error + 'static)) {
        if !self.gate.should_log(level) {
            return;
        }
        let record = LogRecord::new(
            level,
            self.service.as_str(),
            self.pid.as_str(),
            err.to_string(),
        )
        .with_stack(source_chain(err));
        self.dispatch(record);
    }

    /// Log at fatal severity and flush every sink, returning the write
    /// outcome. Fatal severity is a termination directive: the caller is
    /// expected to exit the process once this returns, whatever the
    /// outcome. Keeping termination out of the facade keeps fatal paths
    /// testable.
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        let record = LogRecord::new(
            Severity::Fatal,
            self.service.as_str(),
            self.pid.as_str(),
            message,
        );
        self.write_and_flush(record)
    }

    /// Fatal variant for an error object; see [`Logger::fatal`]
    pub fn fatal_cause(&self, err: &(dyn std::error::Error + 'static)) -> Result<()> {
        let record = LogRecord::new(
            Severity::Fatal,
            self.service.as_str(),
            self.pid.as_str(),
            err.to_string(),
        )
        .with_stack(source_chain(err));
        self.write_and_flush(record)
    }

    fn write_and_flush(&self, record: LogRecord) -> Result<()> {
        let mut sinks = self.sinks.write();
        let write_result = sinks.write(&record);
        let flush_result = sinks.flush();
        write_result.and(flush_result)
    }

    pub fn flush(&self) -> Result<()> {
        self.sinks.write().flush()
    }

    /// An `io::Write` adapter for legacy line-oriented logging call sites.
    /// Each complete line becomes an info-level record through the same
    /// gate and multiplexer as every other call.
    pub fn raw_writer(self: Arc<Self>) -> RawWriter {
        RawWriter::new(self)
    }
}

/// Funnels byte-oriented writes into the facade pipeline, one record per
/// line. Partial lines are buffered until their newline arrives or the
/// writer is flushed or dropped.
pub struct RawWriter {
    logger: Arc<Logger>,
    buffer: Vec<u8>,
}

impl RawWriter {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            buffer: Vec::new(),
        }
    }
}

impl std::io::Write for RawWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                self.logger.info(line);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();
            self.logger.info(line);
        }
        Ok(())
    }
}

impl Drop for RawWriter {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

/// Builder for constructing a facade with explicit sinks, mainly for tests
/// and embedders that bring their own [`Sink`] implementations.
///
/// # Example
/// ```
/// use fanlog::prelude::*;
///
/// let logger = Logger::builder()
///     .service("api")
///     .pid("1")
///     .threshold(Severity::Debug)
///     .sink(ConsoleSink::new())
///     .build();
/// logger.info("ready");
/// ```
pub struct LoggerBuilder {
    service: String,
    pid: String,
    threshold: Severity,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            service: String::new(),
            pid: String::new(),
            threshold: Severity::Info,
            sinks: Vec::new(),
        }
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    #[must_use]
    pub fn pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = pid.into();
        self
    }

    #[must_use]
    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Build the facade. No configured sinks means a console sink, the same
    /// default the multiplexer applies.
    pub fn build(mut self) -> Logger {
        if self.sinks.is_empty() {
            self.sinks.push(Box::new(ConsoleSink::new()));
        }
        Logger {
            service: self.service,
            pid: self.pid,
            gate: SeverityGate::new(self.threshold),
            sinks: RwLock::new(MultiSink::new(self.sinks)),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use parking_lot::Mutex;

    /// Test sink that remembers every record it receives
    struct MemorySink {
        records: Arc<Mutex<Vec<LogRecord>>>,
        flushes: Arc<Mutex<usize>>,
    }

    impl MemorySink {
        fn new() -> (Self, Arc<Mutex<Vec<LogRecord>>>, Arc<Mutex<usize>>) {
            let records = Arc::new(Mutex::new(Vec::new()));
            let flushes = Arc::new(Mutex::new(0));
            (
                Self {
                    records: Arc::clone(&records),
                    flushes: Arc::clone(&flushes),
                },
                records,
                flushes,
            )
        }
    }

    impl Sink for MemorySink {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            *self.flushes.lock() += 1;
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    fn memory_logger(threshold: Severity) -> (Logger, Arc<Mutex<Vec<LogRecord>>>) {
        let (sink, records, _) = MemorySink::new();
        let logger = Logger::builder()
            .service("svc")
            .pid("42")
            .threshold(threshold)
            .sink(sink)
            .build();
        (logger, records)
    }

    #[test]
    fn test_threshold_suppresses_below_and_delivers_at_or_above() {
        let (logger, records) = memory_logger(Severity::Warn);

        logger.info("x");
        assert!(records.lock().is_empty());

        logger.error("y");
        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].service, "svc");
        assert_eq!(records[0].pid, "42");
        assert_eq!(records[0].message, "y");
        assert_eq!(records[0].level, Severity::Error);
    }

    #[test]
    fn test_records_carry_bound_identity() {
        let (logger, records) = memory_logger(Severity::Debug);
        logger.debug("d");
        logger.warn("w");

        let records = records.lock();
        assert!(records.iter().all(|r| r.service == "svc" && r.pid == "42"));
    }

    #[test]
    fn test_log_with_fields() {
        let (logger, records) = memory_logger(Severity::Info);
        logger.log_with_fields(
            Severity::Info,
            "login",
            RecordFields::new().with_field("user", "alice"),
        );

        let records = records.lock();
        assert_eq!(records[0].fields.format_fields(), "user=alice");
    }

    #[test]
    fn test_cause_variants_attach_source_chain() {
        let (logger, records) = memory_logger(Severity::Debug);

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk offline");
        logger.error_cause(&io_err);

        let records = records.lock();
        assert_eq!(records[0].level, Severity::Error);
        assert_eq!(records[0].message, "disk offline");
        assert_eq!(records[0].stack.as_deref(), Some(&["disk offline".to_string()][..]));
    }

    #[test]
    fn test_fatal_flushes_and_reports_outcome() {
        let (sink, records, flushes) = MemorySink::new();
        let logger = Logger::builder()
            .service("svc")
            .pid("42")
            .threshold(Severity::Fatal)
            .sink(sink)
            .build();

        assert!(logger.fatal("going down").is_ok());
        assert_eq!(records.lock().len(), 1);
        assert_eq!(*flushes.lock(), 1);
    }

    #[test]
    fn test_fatal_reports_sink_failure_to_caller() {
        struct BrokenSink;
        impl Sink for BrokenSink {
            fn append(&mut self, _record: &LogRecord) -> Result<()> {
                Err(LoggerError::other("wedged"))
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let logger = Logger::builder()
            .service("svc")
            .pid("1")
            .sink(BrokenSink)
            .build();

        let err = logger.fatal("going down").unwrap_err();
        assert_eq!(err.failed_sinks(), vec!["broken"]);
    }

    #[test]
    fn test_raw_writer_emits_one_record_per_line() {
        use std::io::Write;

        let (sink, records, _) = MemorySink::new();
        let logger = Arc::new(
            Logger::builder()
                .service("svc")
                .pid("1")
                .threshold(Severity::Debug)
                .sink(sink)
                .build(),
        );

        let mut writer = logger.raw_writer();
        writer.write_all(b"first line\nsecond line\npartial").unwrap();

        {
            let records = records.lock();
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].message, "first line");
            assert_eq!(records[1].message, "second line");
            assert!(records.iter().all(|r| r.level == Severity::Info));
        }

        writer.flush().unwrap();
        assert_eq!(records.lock().len(), 3);
        assert_eq!(records.lock()[2].message, "partial");
    }
}
