//! Remote collector sink
//!
//! Reshapes a serialized record into a tagged, timestamped event and pushes
//! it to a log collector over a fresh TCP connection per write. The tag
//! format `{service}_{level}.log` drives collector-side routing rules.

use crate::core::{LogRecord, LoggerError, Result};
use crate::sinks::Sink;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pushes each record to a remote collector as a `[tag, time, fields]`
/// JSON event on its own connection. Opening per write trades latency for
/// not having to manage a long-lived connection's failure modes; this path
/// carries no batching, so the trade is acceptable.
///
/// Schema note: only `time` is removed from the pushed field map; `service`
/// and `level` stay in it alongside driving the tag.
pub struct RemoteSink {
    host: String,
    port: u16,
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl RemoteSink {
    /// Create a remote sink. Host and port are validated here, at
    /// construction time; only transient network conditions surface later,
    /// per write.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(LoggerError::config("RemoteSink", "missing host"));
        }
        if port == 0 {
            return Err(LoggerError::config("RemoteSink", "missing port"));
        }
        Ok(Self {
            host,
            port,
            connect_timeout: CONNECT_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Decode serialized record bytes, derive the routing tag, and push the
    /// event upstream. Returns the number of bytes consumed on success and
    /// consumes nothing on any failure.
    pub fn write_serialized(&self, bytes: &[u8]) -> Result<usize> {
        let mut data: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(bytes).map_err(LoggerError::Decode)?;

        let time_value = data
            .remove("time")
            .ok_or_else(|| LoggerError::schema("time", "not present"))?;
        let secs = time_value
            .as_i64()
            .or_else(|| time_value.as_f64().map(|f| f as i64))
            .ok_or_else(|| LoggerError::schema("time", "expected numeric epoch seconds"))?;
        let time = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| LoggerError::schema("time", "epoch seconds out of range"))?;

        let service = data
            .get("service")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| LoggerError::schema("service", "not present"))?
            .to_string();
        let level = data
            .get("level")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| LoggerError::schema("level", "not present"))?
            .to_string();

        let tag = derive_tag(&service, &level);
        let event = serde_json::json!([tag, time.timestamp(), data]);

        self.push(&event)?;
        Ok(bytes.len())
    }

    /// Open a fresh connection, send one newline-terminated event, and let
    /// the stream drop on every exit path.
    fn push(&self, event: &serde_json::Value) -> Result<()> {
        let mut stream = self.connect()?;
        let mut payload = serde_json::to_vec(event)?;
        payload.push(b'\n');

        stream
            .write_all(&payload)
            .and_then(|_| stream.flush())
            .map_err(|e| LoggerError::remote_sink(self.address(), e.to_string()))
    }

    fn connect(&self) -> Result<TcpStream> {
        let address = self.address();
        let addr = address
            .to_socket_addrs()
            .map_err(|e| LoggerError::remote_sink(address.as_str(), e.to_string()))?
            .next()
            .ok_or_else(|| LoggerError::remote_sink(address.as_str(), "no addresses resolved"))?;

        let stream = TcpStream::connect_timeout(&addr, self.connect_timeout)
            .map_err(|e| LoggerError::remote_sink(address.as_str(), e.to_string()))?;
        stream
            .set_write_timeout(Some(self.write_timeout))
            .map_err(|e| LoggerError::remote_sink(address.as_str(), e.to_string()))?;
        stream
            .set_nodelay(true)
            .map_err(|e| LoggerError::remote_sink(address.as_str(), e.to_string()))?;
        Ok(stream)
    }
}

/// Routing tag for a record: `{service}_{level}.log`, with both parts
/// sanitized so a service name carrying delimiter characters cannot collide
/// with another service's tag.
pub fn derive_tag(service: &str, level: &str) -> String {
    format!("{}_{}.log", sanitize_tag_part(service), sanitize_tag_part(level))
}

fn sanitize_tag_part(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl Sink for RemoteSink {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let bytes = record.to_bytes()?;
        self.write_serialized(&bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Every write opens, flushes, and drops its own connection
        Ok(())
    }

    fn name(&self) -> &str {
        "remote"
    }
}
