//! Serializable logging configuration
//!
//! CNI network configurations carry the logging setup of a plugin as JSON:
//!
//! ```json
//! {
//!   "logLevel": "debug",
//!   "logFile": "/var/log/cni/plugin.log",
//!   "logOptions": { "maxAge": 7, "maxSize": 50, "maxBackups": 3, "compress": false }
//! }
//! ```

use super::error::Result;
use serde::{Deserialize, Serialize};

/// Rotation settings for the managed log file. Unset fields take the
/// documented defaults whenever the options are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationOptions {
    /// Days to keep rotated files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    /// Megabytes before the file is rotated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    /// Rotated files to keep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_backups: Option<usize>,
    /// Gzip rotated files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,
}

impl RotationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_age(mut self, days: u64) -> Self {
        self.max_age = Some(days);
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, megabytes: u64) -> Self {
        self.max_size = Some(megabytes);
        self
    }

    #[must_use]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = Some(count);
        self
    }

    #[must_use]
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }
}

/// Complete logging setup as found in a plugin configuration.
///
/// Applied with `Logger::apply_config`; absent fields leave the logger's
/// current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_stderr: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_options: Option<RotationOptions>,
}

impl LoggingConfig {
    /// Parse from JSON. Unknown keys are ignored so a whole network
    /// configuration can be passed in.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;

    #[test]
    fn test_rotation_options_camel_case() {
        let options: RotationOptions =
            serde_json::from_str(r#"{"maxAge": 7, "maxBackups": 2}"#).unwrap();
        assert_eq!(options.max_age, Some(7));
        assert_eq!(options.max_backups, Some(2));
        assert_eq!(options.max_size, None);
        assert_eq!(options.compress, None);

        let json = serde_json::to_string(&RotationOptions::new().with_compress(false)).unwrap();
        assert_eq!(json, r#"{"compress":false}"#);
    }

    #[test]
    fn test_logging_config_from_network_config() {
        let config = LoggingConfig::from_json(
            r#"{
                "cniVersion": "1.0.0",
                "name": "sriov-net",
                "logLevel": "debug",
                "logFile": "/var/log/cni/sriov.log",
                "logOptions": {"maxSize": 10, "compress": false}
            }"#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/var/log/cni/sriov.log"));
        assert_eq!(config.log_stderr, None);
        let options = config.log_options.unwrap();
        assert_eq!(options.max_size, Some(10));
        assert_eq!(options.compress, Some(false));
    }

    #[test]
    fn test_logging_config_bad_json() {
        let err = LoggingConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }
}
