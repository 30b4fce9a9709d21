//! Shared logging state
//!
//! Every setter takes the write lock once and every getter takes the read
//! lock once, so each call is atomic on its own. Sequences of calls are not
//! transactional.

use super::config::RotationOptions;
use super::level::Level;
use super::prefixer::{DefaultPrefixer, Prefixer, StructuredPrefixer};
use crate::sinks::rotating_file::{RotatingFileWriter, RotationConfig};
use crate::sinks::shared::SharedWriter;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where file output currently goes.
///
/// A custom writer replaces the managed file outright; the next change to
/// the file target or rotation options replaces the custom writer again.
#[derive(Clone, Default)]
pub enum FileTarget {
    #[default]
    Absent,
    /// Snapshot of the rotation descriptor taken when it was last published
    Managed(Arc<Mutex<RotatingFileWriter>>),
    Custom(SharedWriter),
}

/// Which variant of [`FileTarget`] is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileTargetKind {
    Absent,
    Managed,
    Custom,
}

impl FileTarget {
    fn managed(config: &RotationConfig) -> Self {
        FileTarget::Managed(Arc::new(Mutex::new(RotatingFileWriter::new(config.clone()))))
    }

    #[must_use]
    pub fn kind(&self) -> FileTargetKind {
        match self {
            FileTarget::Absent => FileTargetKind::Absent,
            FileTarget::Managed(_) => FileTargetKind::Managed,
            FileTarget::Custom(_) => FileTargetKind::Custom,
        }
    }

    #[must_use]
    pub fn writer(&self) -> Option<SharedWriter> {
        match self {
            FileTarget::Absent => None,
            FileTarget::Managed(writer) => Some(writer.clone()),
            FileTarget::Custom(writer) => Some(writer.clone()),
        }
    }
}

/// Everything the dispatch path needs, read under one lock
pub(crate) struct DispatchView {
    pub level: Level,
    pub log_to_stderr: bool,
    pub file: Option<SharedWriter>,
    pub prefixer: Arc<dyn Prefixer>,
}

struct Inner {
    rotation: RotationConfig,
    file_target: FileTarget,
    log_to_stderr: bool,
    level: Level,
    prefixer: Arc<dyn Prefixer>,
    structured_prefixer: Arc<dyn StructuredPrefixer>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            rotation: RotationConfig::default(),
            file_target: FileTarget::Absent,
            log_to_stderr: true,
            level: Level::Info,
            prefixer: Arc::new(DefaultPrefixer::new()),
            structured_prefixer: Arc::new(DefaultPrefixer::new()),
        }
    }
}

pub struct LoggingState {
    inner: RwLock<Inner>,
}

impl LoggingState {
    /// Fresh state: stderr on, no file, `Info` threshold, default prefixers
    /// and default rotation policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn reset(&self) {
        *self.inner.write() = Inner::default();
    }

    /// Stores the level as given; validation belongs to the caller.
    pub fn set_level(&self, level: Level) {
        self.inner.write().level = level;
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.inner.read().level
    }

    pub fn set_log_to_stderr(&self, enabled: bool) {
        self.inner.write().log_to_stderr = enabled;
    }

    #[must_use]
    pub fn log_to_stderr(&self) -> bool {
        self.inner.read().log_to_stderr
    }

    /// Point the rotation descriptor at `path` and publish a snapshot of it
    /// as the file target.
    pub fn set_file_target(&self, path: &Path) {
        let mut inner = self.inner.write();
        inner.rotation.filename = path.to_path_buf();
        inner.file_target = FileTarget::managed(&inner.rotation);
    }

    pub fn clear_file_target(&self) {
        let mut inner = self.inner.write();
        inner.rotation.filename = PathBuf::new();
        inner.file_target = FileTarget::Absent;
    }

    /// Reset-then-overlay the rotation policy. If file output is active,
    /// a new snapshot of the descriptor becomes the file target.
    pub fn set_rotation_options(&self, options: Option<&RotationOptions>) {
        let mut inner = self.inner.write();
        inner.rotation.apply_options(options);
        if !matches!(inner.file_target, FileTarget::Absent) {
            inner.file_target = FileTarget::managed(&inner.rotation);
        }
    }

    #[must_use]
    pub fn rotation_config(&self) -> RotationConfig {
        self.inner.read().rotation.clone()
    }

    pub fn set_custom_writer(&self, writer: SharedWriter) {
        self.inner.write().file_target = FileTarget::Custom(writer);
    }

    #[must_use]
    pub fn file_target_kind(&self) -> FileTargetKind {
        self.inner.read().file_target.kind()
    }

    #[must_use]
    pub fn is_file_sink_active(&self) -> bool {
        !matches!(self.inner.read().file_target, FileTarget::Absent)
    }

    pub fn set_prefixer(&self, prefixer: Arc<dyn Prefixer>) {
        self.inner.write().prefixer = prefixer;
    }

    pub fn set_structured_prefixer(&self, prefixer: Arc<dyn StructuredPrefixer>) {
        self.inner.write().structured_prefixer = prefixer;
    }

    #[must_use]
    pub fn structured_prefixer(&self) -> Arc<dyn StructuredPrefixer> {
        self.inner.read().structured_prefixer.clone()
    }

    pub(crate) fn dispatch_view(&self) -> DispatchView {
        let inner = self.inner.read();
        DispatchView {
            level: inner.level,
            log_to_stderr: inner.log_to_stderr,
            file: inner.file_target.writer(),
            prefixer: inner.prefixer.clone(),
        }
    }
}

impl Default for LoggingState {
    fn default() -> Self {
        Self::new()
    }
}
