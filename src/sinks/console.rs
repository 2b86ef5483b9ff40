//! Console sink implementation

use crate::core::{LogRecord, Result, Severity};
use crate::sinks::Sink;
use colored::Colorize;
use std::io::Write;

/// Writes human-readable, timestamped lines to the process standard streams.
/// Error and fatal records go to stderr, everything else to stdout.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render a record as a single console line
    pub fn format_record(&self, record: &LogRecord) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", record.level.as_str().to_uppercase())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:5}", record.level.as_str().to_uppercase())
        };

        let base = format!(
            "[{}] [{}] {}[{}] - {}",
            record.time.to_rfc3339(),
            level_str,
            record.service,
            record.pid,
            record.message
        );

        let mut line = base;
        if !record.fields.is_empty() {
            line = format!("{} {}", line, record.fields.format_fields());
        }
        if let Some(ref stack) = record.stack {
            line = format!("{} stack={}", line, stack.join(" <- "));
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format_record(record);

        // One writeln per record against the stream's own lock keeps
        // concurrent writers from interleaving mid-line.
        match record.level {
            Severity::Error | Severity::Fatal => {
                writeln!(std::io::stderr().lock(), "{}", line)?
            }
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
