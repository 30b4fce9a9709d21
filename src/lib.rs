//! # cni_log
//!
//! Leveled logging for CNI plugins.
//!
//! Messages are filtered against a level threshold and written to up to two
//! sinks: standard error, and a size/age rotated log file (or any writer put
//! in its place with [`set_output`]). The text put in front of each message
//! comes from a pluggable [`Prefixer`]; structured `key="value"` messages
//! start with pairs from a pluggable [`StructuredPrefixer`].
//!
//! ```no_run
//! use cni_log::{infof, info_structured, Level, RotationOptions};
//!
//! cni_log::set_log_level(Level::Debug);
//! cni_log::set_log_options(Some(&RotationOptions::new().with_max_backups(3)));
//! cni_log::set_log_file("/var/log/cni/plugin.log");
//!
//! infof!("ADD for container {}", "abc123");
//! info_structured!("ADD", "container", "abc123", "ifname", "net1").unwrap();
//! ```
//!
//! Configuration mistakes (bad level, unusable log file, no sink left) are
//! reported on stderr as `cni-log: ...` lines and never fail the caller.

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        DefaultPrefixer, FieldValue, FileTargetKind, Level, Logger, LoggerError, LoggingConfig,
        Prefixer, PrefixerFn, Result, RotationOptions, StructuredPrefixer, StructuredPrefixerFn,
        TimestampFormat,
    };
    pub use crate::sinks::{RotatingFileWriter, RotationConfig, SharedBuffer};
}

pub use core::{
    DefaultPrefixer, FieldValue, FileTarget, FileTargetKind, Level, Logger, LoggerError,
    LoggingConfig, LoggingState, Prefixer, PrefixerFn, Result, RotationOptions,
    StructuredPrefixer, StructuredPrefixerFn, TimestampFormat,
};
pub use global::{
    apply_config, debug_structured, debugf, error_structured, errorf, get_log_level,
    info_structured, infof, logger, panic_structured, panicf, reset, set_default_prefixer,
    set_default_structured_prefixer, set_log_file, set_log_level, set_log_options,
    set_log_stderr, set_output, set_prefixer, set_structured_prefixer, string_to_level,
    verbosef, warning_structured, warningf,
};
pub use sinks::{shared, RotatingFileWriter, RotationConfig, SharedBuffer, SharedWriter};
