//! Logging macros with `format!`-style arguments.
//!
//! Without a logger the macros use the process-wide logger. Put
//! `logger =>` in front to target a specific [`Logger`](crate::Logger).
//!
//! # Examples
//!
//! ```
//! use cni_log::{infof, info_structured, Logger, SharedBuffer};
//!
//! // Process-wide logger
//! infof!("plugin started for container {}", "abc123");
//!
//! // Explicit logger
//! let logger = Logger::with_console(SharedBuffer::new());
//! infof!(logger => "attached {} interfaces", 2);
//! info_structured!(logger => "attached", "ifname", "net1", "count", 2).unwrap();
//! ```

/// Log a message at the given level.
///
/// ```
/// use cni_log::{logf, Level};
///
/// logf!(Level::Info, "simple message");
/// logf!(Level::Debug, "value: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr => $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::logger().log($level, format_args!($($arg)+))
    };
}

/// Log at `Panic` followed by a stack trace. Does not panic.
#[macro_export]
macro_rules! panicf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.panicf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::panicf(format_args!($($arg)+))
    };
}

/// Log at `Error` and evaluate to a [`LoggerError`](crate::LoggerError)
/// carrying the message.
///
/// ```
/// use cni_log::errorf;
///
/// fn attach(ifname: &str) -> Result<(), cni_log::LoggerError> {
///     Err(errorf!("cannot attach {}", ifname))
/// }
/// assert!(attach("net1").is_err());
/// ```
#[macro_export]
macro_rules! errorf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::errorf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warningf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.warningf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::warningf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr => $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::infof(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::debugf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! verbosef {
    ($logger:expr => $($arg:tt)+) => {
        $logger.verbosef(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::verbosef(format_args!($($arg)+))
    };
}

/// Structured `Panic` message; evaluates to `Result<()>`.
#[macro_export]
macro_rules! panic_structured {
    ($logger:expr => $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.panic_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
    ($msg:expr $(, $field:expr)* $(,)?) => {
        $crate::panic_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
}

/// Structured `Error` message; evaluates to a [`LoggerError`](crate::LoggerError).
#[macro_export]
macro_rules! error_structured {
    ($logger:expr => $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.error_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
    ($msg:expr $(, $field:expr)* $(,)?) => {
        $crate::error_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
}

/// Structured `Warning` message; evaluates to `Result<()>`.
#[macro_export]
macro_rules! warning_structured {
    ($logger:expr => $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.warning_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
    ($msg:expr $(, $field:expr)* $(,)?) => {
        $crate::warning_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
}

/// Structured `Info` message; evaluates to `Result<()>`.
///
/// ```
/// use cni_log::info_structured;
///
/// info_structured!("interface ready", "ifname", "net1", "mtu", 1500).unwrap();
/// assert!(info_structured!("broken", "dangling-key").is_err());
/// ```
#[macro_export]
macro_rules! info_structured {
    ($logger:expr => $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.info_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
    ($msg:expr $(, $field:expr)* $(,)?) => {
        $crate::info_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
}

/// Structured `Debug` message; evaluates to `Result<()>`.
#[macro_export]
macro_rules! debug_structured {
    ($logger:expr => $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.debug_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
    ($msg:expr $(, $field:expr)* $(,)?) => {
        $crate::debug_structured($msg, &[$($crate::FieldValue::from($field)),*])
    };
}
