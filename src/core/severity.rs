//! Severity levels and the threshold gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Parse a configured severity name, falling back to `Info` for anything
    /// unrecognized. Configuration never fails on a bad level name.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Warn => Yellow,
            Severity::Error => Red,
            Severity::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(format!("invalid severity: '{}'", s)),
        }
    }
}

/// Decides, before any record is built, whether a call at a given severity
/// proceeds to the sinks. The threshold is fixed when the gate is built;
/// changing the environment afterwards does not affect an existing gate.
#[derive(Debug, Clone, Copy)]
pub struct SeverityGate {
    threshold: Severity,
}

impl SeverityGate {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    /// Build a gate from a configured severity name, with the `Info` fallback
    pub fn from_name(name: &str) -> Self {
        Self::new(Severity::from_name_or_default(name))
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    #[inline]
    pub fn should_log(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }
}

impl Default for SeverityGate {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}
