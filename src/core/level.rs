//! Log level definitions
//!
//! Common use of the different levels:
//!
//! - `panic`: code crash
//! - `error`: unusual event occurred (invalid input or system issue), exiting prematurely
//! - `warning`: unusual event occurred (invalid input or system issue), but continuing
//! - `info`: basic information, indication of major code paths
//! - `debug`: additional information, indication of minor code branches
//! - `verbose`: output of everything, including large data dumps

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity rank of a message, and the threshold a logger filters against.
///
/// A lower rank is more severe. With the threshold at `Info`, messages at
/// `Panic`, `Error`, `Warning` and `Info` are emitted and `Debug`/`Verbose`
/// are discarded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Level {
    Invalid = -1,
    Panic = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Verbose = 6,
}

impl Level {
    /// The least severe valid level.
    pub const MAXIMUM: Level = Level::Verbose;

    /// Every valid level, most severe first.
    pub const ALL: [Level; 6] = [
        Level::Panic,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Verbose,
    ];

    /// Case-insensitive lookup of a level name.
    ///
    /// Unknown names map to [`Level::Invalid`]. This never prints anything;
    /// use `Logger::string_to_level` for the variant that reports bad input.
    ///
    /// ```
    /// use cni_log::Level;
    ///
    /// assert_eq!(Level::parse("WaRnInG"), Level::Warning);
    /// assert_eq!(Level::parse("bogus"), Level::Invalid);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Level {
        match name.to_lowercase().as_str() {
            "panic" => Level::Panic,
            "error" => Level::Error,
            "warning" => Level::Warning,
            "info" => Level::Info,
            "debug" => Level::Debug,
            "verbose" => Level::Verbose,
            _ => Level::Invalid,
        }
    }

    /// Map an integer rank back to a level; anything outside `1..=6` is `Invalid`.
    #[must_use]
    pub fn from_rank(rank: i64) -> Level {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.rank() == rank)
            .unwrap_or(Level::Invalid)
    }

    #[must_use]
    pub fn rank(self) -> i64 {
        self as i8 as i64
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.rank() > 0 && self <= Level::MAXIMUM
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Panic => "panic",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Level::parse(s) {
            Level::Invalid => Err(LoggerError::unknown_level(s)),
            level => Ok(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_severity() {
        assert!(Level::Panic < Level::Error);
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Verbose);
        assert!(Level::Invalid < Level::Panic);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        for name in ["WARNING", "warning", "WaRnInG"] {
            assert_eq!(Level::parse(name), Level::Warning);
        }
        assert_eq!(Level::parse("Verbose"), Level::Verbose);
        assert_eq!(Level::parse(""), Level::Invalid);
        assert_eq!(Level::parse("warn"), Level::Invalid);
    }

    #[test]
    fn test_validity() {
        for level in Level::ALL {
            assert!(level.is_valid(), "{} should be valid", level);
        }
        assert!(!Level::Invalid.is_valid());
    }

    #[test]
    fn test_from_rank() {
        assert_eq!(Level::from_rank(1), Level::Panic);
        assert_eq!(Level::from_rank(6), Level::Verbose);
        assert_eq!(Level::from_rank(0), Level::Invalid);
        assert_eq!(Level::from_rank(7), Level::Invalid);
        assert_eq!(Level::from_rank(-1), Level::Invalid);
        assert_eq!(Level::from_rank(7).to_string(), "invalid");
    }

    #[test]
    fn test_from_str_trait() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        let err = "nope".parse::<Level>().unwrap_err();
        assert!(matches!(err, LoggerError::UnknownLevel { .. }));
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let level: Level = serde_json::from_str("\"verbose\"").unwrap();
        assert_eq!(level, Level::Verbose);
    }
}
