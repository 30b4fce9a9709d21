//! Byte sinks and log file provisioning

pub mod paths;
pub mod rotating_file;
pub mod shared;

pub use rotating_file::{default_log_path, RotatingFileWriter, RotationConfig};
pub use shared::{shared, SharedBuffer, SharedWriter};
