//! Core logger types and traits

pub mod config;
pub mod error;
pub mod fields;
pub mod level;
pub mod logger;
pub mod prefixer;
pub mod state;
pub mod timestamp;

pub use config::{LoggingConfig, RotationOptions};
pub use error::{LoggerError, Result};
pub use fields::FieldValue;
pub use level::Level;
pub use logger::Logger;
pub use prefixer::{DefaultPrefixer, Prefixer, PrefixerFn, StructuredPrefixer, StructuredPrefixerFn};
pub use state::{FileTarget, FileTargetKind, LoggingState};
pub use timestamp::TimestampFormat;
