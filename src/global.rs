//! Process-wide logger and free-function entry points
//!
//! The process-wide [`Logger`] is created on first use with stderr enabled,
//! no log file, the `Info` threshold and the default prefixers. Each function
//! here forwards to the method of the same name.

use crate::core::{
    FieldValue, Level, Logger, LoggerError, LoggingConfig, Prefixer, Result, RotationOptions,
    StructuredPrefixer,
};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

static LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The process-wide logger
pub fn logger() -> &'static Logger {
    &LOGGER
}

pub fn set_log_level(level: Level) {
    logger().set_log_level(level);
}

pub fn get_log_level() -> Level {
    logger().log_level()
}

/// Parse a level name, reporting unknown names on stderr
pub fn string_to_level(name: &str) -> Level {
    logger().string_to_level(name)
}

pub fn set_log_stderr(enable: bool) {
    logger().set_log_stderr(enable);
}

pub fn set_log_file(path: impl AsRef<Path>) {
    logger().set_log_file(path);
}

pub fn set_log_options(options: Option<&RotationOptions>) {
    logger().set_log_options(options);
}

pub fn set_output<W: Write + Send + 'static>(out: W) {
    logger().set_output(out);
}

pub fn apply_config(config: &LoggingConfig) {
    logger().apply_config(config);
}

pub fn set_prefixer<P: Prefixer + 'static>(prefixer: P) {
    logger().set_prefixer(prefixer);
}

pub fn set_default_prefixer() {
    logger().set_default_prefixer();
}

pub fn set_structured_prefixer<P: StructuredPrefixer + 'static>(prefixer: P) {
    logger().set_structured_prefixer(prefixer);
}

pub fn set_default_structured_prefixer() {
    logger().set_default_structured_prefixer();
}

/// Restore the process-wide logger to its initial configuration
pub fn reset() {
    logger().reset();
}

pub fn panicf(args: fmt::Arguments<'_>) {
    logger().panicf(args);
}

#[must_use]
pub fn errorf(args: fmt::Arguments<'_>) -> LoggerError {
    logger().errorf(args)
}

pub fn warningf(args: fmt::Arguments<'_>) {
    logger().warningf(args);
}

pub fn infof(args: fmt::Arguments<'_>) {
    logger().infof(args);
}

pub fn debugf(args: fmt::Arguments<'_>) {
    logger().debugf(args);
}

pub fn verbosef(args: fmt::Arguments<'_>) {
    logger().verbosef(args);
}

pub fn panic_structured(message: &str, fields: &[FieldValue]) -> Result<()> {
    logger().panic_structured(message, fields)
}

#[must_use]
pub fn error_structured(message: &str, fields: &[FieldValue]) -> LoggerError {
    logger().error_structured(message, fields)
}

pub fn warning_structured(message: &str, fields: &[FieldValue]) -> Result<()> {
    logger().warning_structured(message, fields)
}

pub fn info_structured(message: &str, fields: &[FieldValue]) -> Result<()> {
    logger().info_structured(message, fields)
}

pub fn debug_structured(message: &str, fields: &[FieldValue]) -> Result<()> {
    logger().debug_structured(message, fields)
}
