//! Error types for the logging facility

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A level name that is not in the level table
    #[error("cannot convert '{name}' to a valid logging level")]
    UnknownLevel { name: String },

    /// Attempt to use an out-of-range level as the threshold
    #[error("cannot set logging level to '{level}'")]
    InvalidLevel { level: String },

    /// Log file path was empty after trimming
    #[error("unable to resolve empty string")]
    EmptyPath,

    /// Log file path is a symbolic link
    #[error("unable to evaluate symbolic links on path '{path}'")]
    SymlinkRejected { path: String },

    /// Log file (or its parent directories) could not be created or opened for append
    #[error("failed to set log file '{path}'")]
    FileNotWritable { path: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File rotation error
    #[error("file rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// A structured key/value list had an odd length.
    ///
    /// The payload is the partially rendered message including the
    /// `logging_failure` marker.
    #[error("{payload}")]
    FormatterContractViolation { payload: String },

    /// Value returned by the error-level entry points, carrying the logged text
    #[error("{0}")]
    Reported(String),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    pub fn invalid_level(level: impl ToString) -> Self {
        LoggerError::InvalidLevel {
            level: level.to_string(),
        }
    }

    pub fn symlink(path: impl Into<String>) -> Self {
        LoggerError::SymlinkRejected { path: path.into() }
    }

    pub fn not_writable(path: impl Into<String>) -> Self {
        LoggerError::FileNotWritable { path: path.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn contract_violation(payload: impl Into<String>) -> Self {
        LoggerError::FormatterContractViolation {
            payload: payload.into(),
        }
    }

    pub fn reported(message: impl Into<String>) -> Self {
        LoggerError::Reported(message.into())
    }

    /// True for the odd-length key/value failure raised by structured logging
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, LoggerError::FormatterContractViolation { .. })
    }
}
