//! Timestamp formatting for the default prefixers
//!
//! The default is RFC 3339 with nanosecond precision in local time, which is
//! what CNI plugin logs have always carried.

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use cni_log::TimestampFormat;
///
/// let stamp = TimestampFormat::Rfc3339Nano.format_now();
/// assert!(stamp.contains('T'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with up to nine fractional digits, trailing zeros trimmed:
    /// `2025-01-08T10:30:45.1234567+01:00`
    #[default]
    Rfc3339Nano,

    /// RFC 3339 with whole seconds: `2025-01-08T10:30:45+01:00`
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+01:00`
    Iso8601Millis,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use cni_log::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::Rfc3339Nano => {
                trim_fraction(datetime.to_rfc3339_opts(SecondsFormat::Nanos, true))
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Iso8601Millis => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn format_now(&self) -> String {
        self.format(&Local::now())
    }
}

/// Drop trailing zeros from the fractional seconds, and the dot with them
/// when nothing is left.
fn trim_fraction(stamp: String) -> String {
    let Some(dot) = stamp.find('.') else {
        return stamp;
    };
    let end = stamp[dot + 1..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(stamp.len(), |i| dot + 1 + i);
    let fraction = stamp[dot + 1..end].trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}{}", &stamp[..dot], &stamp[end..])
    } else {
        format!("{}.{}{}", &stamp[..dot], fraction, &stamp[end..])
    }
}
