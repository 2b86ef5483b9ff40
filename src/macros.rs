//! Formatted logging macros
//!
//! The `format!`-style counterparts of the plain facade methods.
//!
//! # Examples
//!
//! ```
//! use fanlog::prelude::*;
//! use fanlog::info;
//!
//! let logger = Logger::builder().service("api").pid("1").build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! ```

/// Log a message at an explicit severity with automatic formatting.
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder().service("api").pid("1").build();
/// use fanlog::log;
/// log!(logger, Severity::Info, "simple message");
/// log!(logger, Severity::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message with automatic formatting.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message with automatic formatting.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warn-level message with automatic formatting.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message with automatic formatting.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message with automatic formatting. Yields the write
/// outcome of [`Logger::fatal`](crate::Logger::fatal); terminating the
/// process afterwards is the caller's step.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}
