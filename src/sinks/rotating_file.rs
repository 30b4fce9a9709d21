//! Size and age based rotating log file
//!
//! [`RotatingFileWriter`] is a plain [`Write`] sink. The file is opened on the
//! first write. When a write would push the file past `max_size` megabytes the
//! current file is renamed to `<name>.1` (older backups shift up by one), a
//! fresh file is opened, and old backups are pruned by count and age.
//! Rotated files are gzipped when `compress` is set.

use crate::core::config::RotationOptions;
use crate::core::error::{LoggerError, Result};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const DEFAULT_MAX_SIZE_MB: u64 = 100;
pub const DEFAULT_MAX_AGE_DAYS: u64 = 5;
pub const DEFAULT_MAX_BACKUPS: usize = 5;
pub const DEFAULT_COMPRESS: bool = true;

const MEGABYTE: u64 = 1024 * 1024;
const DEFAULT_LOG_SUFFIX: &str = "-cni.log";
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Rotation descriptor: the target path plus the rotation policy
///
/// # Examples
///
/// ```
/// use cni_log::{RotationConfig, RotationOptions};
///
/// let mut config = RotationConfig::default();
/// config.apply_options(Some(&RotationOptions::new().with_max_backups(2)));
/// assert_eq!(config.max_backups, 2);
/// assert_eq!(config.max_size, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// Target file; empty while no managed file is configured
    pub filename: PathBuf,
    /// Megabytes before rotation; `0` means the default
    pub max_size: u64,
    /// Days to keep backups; `0` keeps them regardless of age
    pub max_age: u64,
    /// Backups to keep; `0` keeps all of them
    pub max_backups: usize,
    pub compress: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::new(),
            max_size: DEFAULT_MAX_SIZE_MB,
            max_age: DEFAULT_MAX_AGE_DAYS,
            max_backups: DEFAULT_MAX_BACKUPS,
            compress: DEFAULT_COMPRESS,
        }
    }
}

impl RotationConfig {
    /// Reset the policy fields to their defaults, then overlay whatever
    /// `options` sets. The filename is left untouched.
    pub fn apply_options(&mut self, options: Option<&RotationOptions>) {
        let defaults = RotationConfig::default();
        let options = options.cloned().unwrap_or_default();

        self.max_age = options.max_age.unwrap_or(defaults.max_age);
        self.max_size = options.max_size.unwrap_or(defaults.max_size);
        self.max_backups = options.max_backups.unwrap_or(defaults.max_backups);
        self.compress = options.compress.unwrap_or(defaults.compress);
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        let megabytes = if self.max_size == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size
        };
        megabytes.saturating_mul(MEGABYTE)
    }
}

/// File used when no filename is configured: `<tmp>/<program>-cni.log`
#[must_use]
pub fn default_log_path() -> PathBuf {
    let program = std::env::args_os()
        .next()
        .and_then(|arg0| Path::new(&arg0).file_name().map(OsString::from))
        .unwrap_or_else(|| OsString::from("cni"));
    let mut name = program;
    name.push(DEFAULT_LOG_SUFFIX);
    std::env::temp_dir().join(name)
}

pub struct RotatingFileWriter {
    config: RotationConfig,
    max_bytes: u64,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileWriter {
    /// Create a writer for `config`. Nothing touches the disk until the
    /// first write. An empty filename is replaced by [`default_log_path`].
    #[must_use]
    pub fn new(mut config: RotationConfig) -> Self {
        if config.filename.as_os_str().is_empty() {
            config.filename = default_log_path();
        }
        let max_bytes = config.max_bytes();
        Self {
            config,
            max_bytes,
            writer: None,
            current_size: 0,
        }
    }

    /// Override the rotation threshold with an exact byte count
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes.max(1);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.filename
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Open the existing file for append, rotating first if `incoming`
    /// bytes would not fit.
    fn open_existing_or_new(&mut self, incoming: u64) -> Result<()> {
        let path = self.config.filename.clone();
        let existing = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(_) => return self.open_new(),
        };

        if existing + incoming > self.max_bytes {
            return self.rotate();
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = existing;
        Ok(())
    }

    fn open_new(&mut self) -> Result<()> {
        let path = &self.config.filename;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    format!("cannot create '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    /// Close the current file, shift backups, and start a fresh file.
    pub fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.config.filename.display().to_string(),
                    format!("flush before rotation failed: {}", e),
                )
            })?;
        }

        let highest = self.backup_indices().into_iter().max().unwrap_or(0);
        for index in (1..=highest).rev() {
            for (from, to) in [
                (self.backup_path(index), self.backup_path(index + 1)),
                (self.compressed_path(index), self.compressed_path(index + 1)),
            ] {
                if from.exists() {
                    fs::rename(&from, &to).map_err(|e| {
                        LoggerError::file_rotation(
                            from.display().to_string(),
                            format!("cannot shift backup: {}", e),
                        )
                    })?;
                }
            }
        }

        let first_backup = self.backup_path(1);
        if self.path().exists() {
            fs::rename(self.path(), &first_backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path().display().to_string(),
                    format!("cannot move current log file: {}", e),
                )
            })?;

            if self.config.compress {
                if let Err(e) = compress_file(&first_backup, &self.compressed_path(1)) {
                    eprintln!("cni-log: {}", e);
                }
            }
        }

        self.prune_backups();
        self.open_new()
    }

    /// Remove backups over the count limit and backups older than `max_age`.
    fn prune_backups(&self) {
        let max_age = (self.config.max_age > 0)
            .then(|| Duration::from_secs(DAY.as_secs().saturating_mul(self.config.max_age)));
        let now = SystemTime::now();

        for index in self.backup_indices() {
            let over_count = self.config.max_backups > 0 && index > self.config.max_backups;
            for path in [self.backup_path(index), self.compressed_path(index)] {
                let too_old = max_age.is_some_and(|limit| {
                    fs::metadata(&path)
                        .and_then(|meta| meta.modified())
                        .ok()
                        .and_then(|modified| now.duration_since(modified).ok())
                        .is_some_and(|age| age > limit)
                });
                if (over_count || too_old) && path.exists() {
                    if let Err(e) = fs::remove_file(&path) {
                        eprintln!(
                            "cni-log: failed to remove old log file '{}': {}",
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    fn file_name(&self) -> OsString {
        self.config
            .filename
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("cni.log"))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_name();
        name.push(format!(".{}", index));
        self.config.filename.with_file_name(name)
    }

    fn compressed_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_name();
        name.push(format!(".{}.gz", index));
        self.config.filename.with_file_name(name)
    }

    /// Indices of the `<name>.N` and `<name>.N.gz` files next to the log file
    fn backup_indices(&self) -> Vec<usize> {
        let base = self.file_name().to_string_lossy().into_owned();
        let dir = match self.config.filename.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut indices: Vec<usize> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let suffix = name.strip_prefix(&base)?.strip_prefix('.')?;
                let digits = suffix.strip_suffix(".gz").unwrap_or(suffix);
                digits.parse::<usize>().ok().filter(|index| *index > 0)
            })
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let incoming = buf.len() as u64;
        if incoming > self.max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write length {} exceeds maximum file size {}",
                    incoming, self.max_bytes
                ),
            ));
        }

        if self.writer.is_none() {
            self.open_existing_or_new(incoming).map_err(io::Error::other)?;
        } else if self.current_size + incoming > self.max_bytes {
            self.rotate().map_err(io::Error::other)?;
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("log file not open"))?;
        let written = writer.write(buf)?;
        self.current_size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for RotatingFileWriter {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// Gzip `path` into `gz_path`, removing `path` only once the archive is complete.
fn compress_file(path: &Path, gz_path: &Path) -> Result<()> {
    let mut temp_name = gz_path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let compress = || -> io::Result<()> {
        let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
        let output = BufWriter::with_capacity(64 * 1024, File::create(&temp_path)?);
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
        io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;
        fs::rename(&temp_path, gz_path)
    };

    if let Err(e) = compress() {
        let _ = fs::remove_file(&temp_path);
        return Err(LoggerError::io_operation(
            "compressing rotated log",
            format!("cannot compress '{}'", path.display()),
            e,
        ));
    }

    fs::remove_file(path).map_err(|e| {
        LoggerError::io_operation(
            "compressing rotated log",
            format!("cannot remove '{}' after compression", path.display()),
            e,
        )
    })
}
