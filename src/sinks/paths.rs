//! Log file target validation
//!
//! A log file target is accepted only if the path is non-empty, is not a
//! symbolic link, and can be opened for append (creating parent directories
//! on the way).

use crate::core::error::{LoggerError, Result};
use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};

/// Reject empty paths and symlinks, and return the lexically cleaned path.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.to_string_lossy().trim().is_empty() {
        return Err(LoggerError::EmptyPath);
    }

    if is_symlink(path) {
        return Err(LoggerError::symlink(path.display().to_string()));
    }

    Ok(clean(path))
}

#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

/// Create missing parent directories and probe-open the file for append.
pub fn ensure_writable(path: &Path) -> Result<()> {
    let not_writable = || LoggerError::not_writable(path.display().to_string());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|_| not_writable())?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|_| not_writable())
}

/// Drop `.` components and repeated separators. `..` is kept as-is.
fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(
            resolve_path(Path::new("")),
            Err(LoggerError::EmptyPath)
        ));
        assert!(matches!(
            resolve_path(Path::new("   ")),
            Err(LoggerError::EmptyPath)
        ));
    }

    #[test]
    fn test_clean_path() {
        let resolved = resolve_path(Path::new("/var//log/./cni.log")).unwrap();
        assert_eq!(resolved, PathBuf::from("/var/log/cni.log"));
        assert_eq!(clean(Path::new("./")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_rejected() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real.log");
        let link = dir.path().join("link.log");
        fs::write(&target, b"").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(is_symlink(&link));
        assert!(!is_symlink(&target));
        let err = resolve_path(&link).unwrap_err();
        assert!(matches!(err, LoggerError::SymlinkRejected { .. }));
        assert!(err.to_string().contains("link.log"));
    }

    #[test]
    fn test_ensure_writable_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("cni.log");

        ensure_writable(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_ensure_writable_fails_under_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("cni.log");

        let err = ensure_writable(&path).unwrap_err();
        assert!(matches!(err, LoggerError::FileNotWritable { .. }));
    }
}
