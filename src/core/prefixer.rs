//! Pluggable formatting for plain and structured messages
//!
//! A [`Prefixer`] produces the text put in front of every plain message.
//! A [`StructuredPrefixer`] produces the leading key/value pairs of every
//! structured message. Both are called on the logging thread for every
//! message that passes the level gate.

use super::fields::FieldValue;
use super::level::Level;
use super::timestamp::TimestampFormat;

pub trait Prefixer: Send + Sync {
    /// Produce the prefix for a plain message at `level`.
    fn create_prefix(&self, level: Level) -> String;
}

pub trait StructuredPrefixer: Send + Sync {
    /// Produce the leading pairs of a structured message as a flat
    /// `[key, value, key, value, ...]` list.
    ///
    /// The list must have an even length. An odd list makes the structured
    /// entry point fail with `LoggerError::FormatterContractViolation`.
    fn create_structured_prefix(&self, level: Level, message: &str) -> Vec<FieldValue>;
}

/// Adapter turning a closure into a [`Prefixer`]
///
/// ```
/// use cni_log::{Level, Prefixer, PrefixerFn};
///
/// let prefixer = PrefixerFn(|level: Level| format!("[{}] ", level));
/// assert_eq!(prefixer.create_prefix(Level::Info), "[info] ");
/// ```
pub struct PrefixerFn<F>(pub F);

impl<F> Prefixer for PrefixerFn<F>
where
    F: Fn(Level) -> String + Send + Sync,
{
    fn create_prefix(&self, level: Level) -> String {
        (self.0)(level)
    }
}

/// Adapter turning a closure into a [`StructuredPrefixer`]
pub struct StructuredPrefixerFn<F>(pub F);

impl<F> StructuredPrefixer for StructuredPrefixerFn<F>
where
    F: Fn(Level, &str) -> Vec<FieldValue> + Send + Sync,
{
    fn create_structured_prefix(&self, level: Level, message: &str) -> Vec<FieldValue> {
        (self.0)(level, message)
    }
}

/// Timestamp-and-level prefixer installed when a logger is created.
///
/// Plain output looks like `2025-01-08T10:30:45.123456789+01:00 [info] message`;
/// structured output starts with `time="..." level="info" msg="..."`.
#[derive(Debug, Clone, Default)]
pub struct DefaultPrefixer {
    timestamp_format: TimestampFormat,
}

impl DefaultPrefixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Prefixer for DefaultPrefixer {
    fn create_prefix(&self, level: Level) -> String {
        format!("{} [{}] ", self.timestamp_format.format_now(), level)
    }
}

impl StructuredPrefixer for DefaultPrefixer {
    fn create_structured_prefix(&self, level: Level, message: &str) -> Vec<FieldValue> {
        vec![
            "time".into(),
            self.timestamp_format.format_now().into(),
            "level".into(),
            level.into(),
            "msg".into(),
            message.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix_shape() {
        let prefix = DefaultPrefixer::new().create_prefix(Level::Warning);
        assert!(prefix.ends_with(" [warning] "), "{}", prefix);
        let stamp = prefix.split(' ').next().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "{}", stamp);
    }

    #[test]
    fn test_default_prefix_custom_timestamp() {
        let prefixer = DefaultPrefixer::new()
            .with_timestamp_format(TimestampFormat::Custom("STAMP".to_string()));
        assert_eq!(prefixer.create_prefix(Level::Error), "STAMP [error] ");
    }

    #[test]
    fn test_default_structured_prefix() {
        let pairs = DefaultPrefixer::new().create_structured_prefix(Level::Info, "evt");
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], FieldValue::from("time"));
        assert_eq!(pairs[2], FieldValue::from("level"));
        assert_eq!(pairs[3].to_string(), "info");
        assert_eq!(pairs[4], FieldValue::from("msg"));
        assert_eq!(pairs[5], FieldValue::from("evt"));
    }

    #[test]
    fn test_fn_adapters() {
        let prefixer = PrefixerFn(|level: Level| format!("<{}>", level.rank()));
        assert_eq!(prefixer.create_prefix(Level::Debug), "<5>");

        let structured = StructuredPrefixerFn(|level: Level, msg: &str| -> Vec<FieldValue> {
            vec!["lvl".into(), level.into(), "text".into(), msg.into()]
        });
        let pairs = structured.create_structured_prefix(Level::Panic, "boom");
        assert_eq!(pairs[1].to_string(), "panic");
        assert_eq!(pairs[3].to_string(), "boom");
    }
}
