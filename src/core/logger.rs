//! Logger: setup with validation, and the dispatch pipeline
//!
//! A message is first gated on the level threshold, then dropped if neither
//! stderr nor a file target is enabled, then prefixed (plain messages only)
//! and written as one line to every enabled sink. Sink write errors are
//! swallowed.
//!
//! Configuration problems are reported on the console handle (stderr by
//! default) as `cni-log: ...` lines, independent of level and of whether
//! stderr logging is enabled.

use super::{
    config::{LoggingConfig, RotationOptions},
    error::{LoggerError, Result},
    fields::{render_pair, FieldValue},
    level::Level,
    prefixer::{DefaultPrefixer, Prefixer, StructuredPrefixer},
    state::{FileTargetKind, LoggingState},
};
use crate::sinks::paths::{ensure_writable, resolve_path};
use crate::sinks::rotating_file::RotationConfig;
use crate::sinks::shared::{shared, write_line, SharedWriter};
use std::backtrace::Backtrace;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const NOTHING_LOGGED_MSG: &str =
    "filename is required when logging to stderr is off - will not log anything";
const STRUCTURED_ODD_ARGUMENTS: &str =
    "must provide an even number of arguments for structured logging";
const PREFIXER_ODD_ARGUMENTS: &str =
    "prefixer must return an even number of arguments for structured logging";
const STACK_TRACE_BEGIN: &str = "========= Stack trace output ========";
const STACK_TRACE_END: &str = "========= Stack trace output end ========";

pub struct Logger {
    state: LoggingState,
    /// Stderr sink and diagnostics channel
    console: SharedWriter,
}

impl Logger {
    /// Logger writing its stderr output and diagnostics to the process stderr
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(io::stderr())
    }

    /// Logger whose stderr sink and diagnostics go to `console` instead
    #[must_use]
    pub fn with_console<W: Write + Send + 'static>(console: W) -> Self {
        Self {
            state: LoggingState::new(),
            console: shared(console),
        }
    }

    /// Restore the initial configuration: stderr on, no file, `Info`,
    /// default prefixers and rotation policy.
    pub fn reset(&self) {
        self.state.reset();
    }

    fn diagnostic(&self, message: impl fmt::Display) {
        write_line(&self.console, &format!("cni-log: {}\n", message));
    }

    // ------------------------------------------------------------------
    // Level
    // ------------------------------------------------------------------

    /// Set the threshold. Invalid levels are reported and ignored.
    pub fn set_log_level(&self, level: Level) {
        if level.is_valid() {
            self.state.set_level(level);
        } else {
            self.diagnostic(LoggerError::invalid_level(level));
        }
    }

    #[must_use]
    pub fn log_level(&self) -> Level {
        self.state.level()
    }

    /// Like [`Level::parse`], but reports unknown names on the console.
    pub fn string_to_level(&self, name: &str) -> Level {
        match name.parse::<Level>() {
            Ok(level) => level,
            Err(e) => {
                self.diagnostic(e);
                Level::Invalid
            }
        }
    }

    // ------------------------------------------------------------------
    // Sinks
    // ------------------------------------------------------------------

    /// Enable or disable the stderr sink. Disabling it while no file output
    /// is active prints a warning, and is applied anyway.
    pub fn set_log_stderr(&self, enable: bool) {
        if !enable && !self.state.is_file_sink_active() {
            self.diagnostic(NOTHING_LOGGED_MSG);
        }
        self.state.set_log_to_stderr(enable);
    }

    #[must_use]
    pub fn log_stderr(&self) -> bool {
        self.state.log_to_stderr()
    }

    /// Log to a rotating file at `path`, or stop file logging with an empty path.
    ///
    /// The path must not be a symlink and must be writable (missing parent
    /// directories are created). On failure the previous target stays active.
    pub fn set_log_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            if !self.state.log_to_stderr() {
                self.diagnostic(NOTHING_LOGGED_MSG);
            }
            self.state.clear_file_target();
            return;
        }

        let resolved = match resolve_path(path) {
            Ok(resolved) => resolved,
            Err(e) => {
                self.diagnostic(e);
                return;
            }
        };

        if ensure_writable(&resolved).is_err() {
            self.diagnostic(LoggerError::not_writable(path.display().to_string()));
            return;
        }

        self.state.set_file_target(path);
    }

    /// The managed log file, if one is configured
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        let filename = self.state.rotation_config().filename;
        (!filename.as_os_str().is_empty()).then_some(filename)
    }

    /// Reset the rotation policy to defaults and overlay `options`. An active
    /// file target (including a custom writer) is replaced by a fresh
    /// snapshot of the managed file.
    pub fn set_log_options(&self, options: Option<&RotationOptions>) {
        self.state.set_rotation_options(options);
    }

    #[must_use]
    pub fn log_options(&self) -> RotationConfig {
        self.state.rotation_config()
    }

    /// Send file output to `out` instead of the managed file, until the next
    /// `set_log_file` or `set_log_options`.
    pub fn set_output<W: Write + Send + 'static>(&self, out: W) {
        self.state.set_custom_writer(shared(out));
    }

    /// Like [`set_output`](Self::set_output) for a writer that is already shared
    pub fn set_shared_output(&self, out: SharedWriter) {
        self.state.set_custom_writer(out);
    }

    #[must_use]
    pub fn is_file_logging_enabled(&self) -> bool {
        self.state.is_file_sink_active()
    }

    #[must_use]
    pub fn file_target_kind(&self) -> FileTargetKind {
        self.state.file_target_kind()
    }

    /// Apply a parsed configuration: rotation options, file, stderr, then level.
    /// Fields that are absent are left as they are.
    pub fn apply_config(&self, config: &LoggingConfig) {
        if let Some(options) = &config.log_options {
            self.set_log_options(Some(options));
        }
        if let Some(file) = &config.log_file {
            self.set_log_file(file);
        }
        if let Some(enable) = config.log_stderr {
            self.set_log_stderr(enable);
        }
        if let Some(name) = &config.log_level {
            self.set_log_level(self.string_to_level(name));
        }
    }

    // ------------------------------------------------------------------
    // Prefixers
    // ------------------------------------------------------------------

    pub fn set_prefixer<P: Prefixer + 'static>(&self, prefixer: P) {
        self.state.set_prefixer(Arc::new(prefixer));
    }

    pub fn set_default_prefixer(&self) {
        self.set_prefixer(DefaultPrefixer::new());
    }

    pub fn set_structured_prefixer<P: StructuredPrefixer + 'static>(&self, prefixer: P) {
        self.state.set_structured_prefixer(Arc::new(prefixer));
    }

    pub fn set_default_structured_prefixer(&self) {
        self.set_structured_prefixer(DefaultPrefixer::new());
    }

    // ------------------------------------------------------------------
    // Plain entry points
    // ------------------------------------------------------------------

    /// Log at `level` with the active prefixer. Invalid levels are dropped.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if level.is_valid() {
            self.print(level, true, &args.to_string());
        }
    }

    /// Log at `Panic`, followed by the current stack trace between banners.
    /// Does not panic.
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Panic, args);
        self.log(Level::Panic, format_args!("{}", STACK_TRACE_BEGIN));
        self.log(Level::Panic, format_args!("{}", Backtrace::force_capture()));
        self.log(Level::Panic, format_args!("{}", STACK_TRACE_END));
    }

    /// Log at `Error` and return the message as an error for the caller to propagate.
    ///
    /// ```
    /// use cni_log::{Logger, SharedBuffer};
    ///
    /// let logger = Logger::with_console(SharedBuffer::new());
    /// let err = logger.errorf(format_args!("no such device {}", "eth7"));
    /// assert_eq!(err.to_string(), "no such device eth7");
    /// ```
    #[must_use]
    pub fn errorf(&self, args: fmt::Arguments<'_>) -> LoggerError {
        let message = args.to_string();
        self.print(Level::Error, true, &message);
        LoggerError::reported(message)
    }

    #[inline]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, args);
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    #[inline]
    pub fn verbosef(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Verbose, args);
    }

    // ------------------------------------------------------------------
    // Structured entry points
    // ------------------------------------------------------------------

    /// Build the `key="value"` text for a structured message: the structured
    /// prefixer's pairs followed by `fields`.
    ///
    /// Fails with `FormatterContractViolation` if either list has an odd
    /// length. For an odd `fields` list the payload keeps the rendered prefix
    /// pairs followed by the `logging_failure` marker.
    pub fn structured_message(
        &self,
        level: Level,
        message: &str,
        fields: &[FieldValue],
    ) -> Result<String> {
        let prefix = self
            .state
            .structured_prefixer()
            .create_structured_prefix(level, message);
        if prefix.len() % 2 != 0 {
            return Err(LoggerError::contract_violation(format!(
                "msg={:?} logging_failure={:?}",
                message, PREFIXER_ODD_ARGUMENTS
            )));
        }

        let mut output: Vec<String> = prefix
            .chunks_exact(2)
            .map(|pair| render_pair(&pair[0], &pair[1]))
            .collect();

        if fields.len() % 2 != 0 {
            output.push(format!("logging_failure={:?}", STRUCTURED_ODD_ARGUMENTS));
            return Err(LoggerError::contract_violation(output.join(" ")));
        }

        output.extend(
            fields
                .chunks_exact(2)
                .map(|pair| render_pair(&pair[0], &pair[1])),
        );
        Ok(output.join(" "))
    }

    /// Build and dispatch a structured message without the plain prefix.
    pub fn log_structured(&self, level: Level, message: &str, fields: &[FieldValue]) -> Result<()> {
        if !level.is_valid() {
            return Ok(());
        }
        let line = self.structured_message(level, message, fields)?;
        self.print(level, false, &line);
        Ok(())
    }

    /// Structured `Panic` message with a trailing `stacktrace` pair
    pub fn panic_structured(&self, message: &str, fields: &[FieldValue]) -> Result<()> {
        let mut fields = fields.to_vec();
        fields.push("stacktrace".into());
        fields.push(Backtrace::force_capture().to_string().into());
        self.log_structured(Level::Panic, message, &fields)
    }

    /// Structured `Error` message, returned as an error carrying the rendered line.
    ///
    /// If the key/value contract is broken nothing is logged and the
    /// `FormatterContractViolation` is returned instead.
    #[must_use]
    pub fn error_structured(&self, message: &str, fields: &[FieldValue]) -> LoggerError {
        match self.structured_message(Level::Error, message, fields) {
            Ok(line) => {
                self.print(Level::Error, false, &line);
                LoggerError::reported(line)
            }
            Err(e) => e,
        }
    }

    pub fn warning_structured(&self, message: &str, fields: &[FieldValue]) -> Result<()> {
        self.log_structured(Level::Warning, message, fields)
    }

    pub fn info_structured(&self, message: &str, fields: &[FieldValue]) -> Result<()> {
        self.log_structured(Level::Info, message, fields)
    }

    pub fn debug_structured(&self, message: &str, fields: &[FieldValue]) -> Result<()> {
        self.log_structured(Level::Debug, message, fields)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    fn print(&self, level: Level, with_prefix: bool, message: &str) {
        let view = self.state.dispatch_view();
        if level > view.level {
            return;
        }
        if !view.log_to_stderr && view.file.is_none() {
            return;
        }

        let line = if with_prefix {
            format!("{}{}\n", view.prefixer.create_prefix(level), message)
        } else {
            format!("{}\n", message)
        };

        if view.log_to_stderr {
            write_line(&self.console, &line);
        }
        if let Some(file) = view.file {
            write_line(&file, &line);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
