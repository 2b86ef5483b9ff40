//! Log record structure and its transport codec

use super::fields::RecordFields;
use super::severity::Severity;
use crate::core::error::{LoggerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single structured log record. Built once per logging call and immutable
/// afterwards. On the wire the timestamp is the `time` field as numeric epoch
/// seconds, and `fields` are flattened into the top-level object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "time", with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    pub level: Severity,
    pub service: String,
    pub pid: String,
    pub message: String,
    #[serde(flatten)]
    pub fields: RecordFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
}

impl LogRecord {
    /// Escape newlines and tabs so a crafted message cannot forge extra
    /// console lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        level: Severity,
        service: impl Into<String>,
        pid: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            time: Utc::now(),
            level,
            service: service.into(),
            pid: pid.into(),
            message: Self::sanitize_message(&message.into()),
            fields: RecordFields::new(),
            stack: None,
        }
    }

    pub fn with_fields(mut self, fields: RecordFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_stack(mut self, stack: Vec<String>) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Serialize to the transport-neutral JSON form
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(LoggerError::Json)
    }

    /// Decode a record from its JSON form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(LoggerError::Decode)
    }
}

/// Walk an error's source chain, outermost error first. This is the stack
/// shape attached to records by the `*_cause` facade variants.
pub fn source_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut frames = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        frames.push(cause.to_string());
        current = cause.source();
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::FieldValue;

    #[test]
    fn test_record_serializes_time_as_epoch_seconds() {
        let record = LogRecord::new(Severity::Error, "svc", "42", "boom");
        let value: serde_json::Value =
            serde_json::from_slice(&record.to_bytes().unwrap()).unwrap();

        assert!(value["time"].is_i64());
        assert_eq!(value["level"], "error");
        assert_eq!(value["service"], "svc");
        assert_eq!(value["pid"], "42");
        assert_eq!(value["message"], "boom");
    }

    #[test]
    fn test_fields_flatten_into_top_level() {
        let record = LogRecord::new(Severity::Info, "svc", "1", "hi")
            .with_fields(RecordFields::new().with_field("request_id", "abc"));
        let value: serde_json::Value =
            serde_json::from_slice(&record.to_bytes().unwrap()).unwrap();

        assert_eq!(value["request_id"], "abc");
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_stack_omitted_when_absent() {
        let record = LogRecord::new(Severity::Warn, "svc", "1", "w");
        let value: serde_json::Value =
            serde_json::from_slice(&record.to_bytes().unwrap()).unwrap();
        assert!(value.get("stack").is_none());

        let record = record.with_stack(vec!["outer".to_string(), "inner".to_string()]);
        let value: serde_json::Value =
            serde_json::from_slice(&record.to_bytes().unwrap()).unwrap();
        assert_eq!(value["stack"], serde_json::json!(["outer", "inner"]));
    }

    #[test]
    fn test_codec_round_trip() {
        let record = LogRecord::new(Severity::Error, "svc", "42", "boom")
            .with_fields(RecordFields::new().with_field("attempt", 3));

        let back = LogRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
        assert_eq!(back.level, Severity::Error);
        assert_eq!(back.service, "svc");
        assert_eq!(back.pid, "42");
        assert_eq!(back.message, "boom");
        assert_eq!(back.fields.get("attempt"), Some(&FieldValue::Int(3)));
        // epoch-seconds wire form keeps the instant at 1-second resolution
        assert_eq!(back.time.timestamp(), record.time.timestamp());
    }

    #[test]
    fn test_message_newlines_escaped() {
        let record = LogRecord::new(Severity::Info, "svc", "1", "line1\nline2");
        assert_eq!(record.message, "line1\\nline2");
    }

    #[test]
    fn test_source_chain_outermost_first() {
        #[derive(Debug)]
        struct Inner;
        impl std::fmt::Display for Inner {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "disk offline")
            }
        }
        impl std::error::Error for Inner {}

        #[derive(Debug)]
        struct Outer(Inner);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "save failed")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let frames = source_chain(&Outer(Inner));
        assert_eq!(frames, vec!["save failed", "disk offline"]);
    }
}
