//! Manifest file reading and in-place replacement
//!
//! This module provides:
//! - Reading a manifest with path-aware errors
//! - Replacing a manifest through a `.bak` backup that is restored if the
//!   write fails and removed once it succeeds

use crate::error::ManifestError;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to the manifest file name while it is being replaced
pub const BACKUP_SUFFIX: &str = ".bak";

/// Read a manifest file content safely
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Path of the backup kept while `path` is rewritten (`go.mod` -> `go.mod.bak`)
pub(crate) fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Replace the manifest at `path` with `content`
///
/// The original is renamed to the backup path first. If writing fails the
/// backup is moved back, so the manifest is left as it was. If even that
/// fails, the error names the backup holding the original content.
pub fn replace_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    replace_with(path, content, |p, c| fs::write(p, c))
}

fn replace_with<W>(path: &Path, content: &str, write: W) -> Result<(), ManifestError>
where
    W: FnOnce(&Path, &str) -> io::Result<()>,
{
    let backup = backup_path(path);

    fs::rename(path, &backup).map_err(|e| ManifestError::BackupError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Err(e) = write(path, content) {
        let _ = fs::remove_file(path);
        if fs::rename(&backup, path).is_err() {
            return Err(ManifestError::RestoreError {
                path: path.to_path_buf(),
                backup,
                source: e,
            });
        }
        return Err(ManifestError::write_error(path, e));
    }

    let _ = fs::remove_file(&backup);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ORIGINAL: &str = "module example.com/test\n\ngo 1.21\n";

    fn create_go_mod(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("go.mod");
        fs::write(&path, ORIGINAL).unwrap();
        path
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/work/go.mod")),
            PathBuf::from("/work/go.mod.bak")
        );
        assert_eq!(backup_path(Path::new("go.mod")), PathBuf::from("go.mod.bak"));
    }

    #[test]
    fn test_read_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_go_mod(&temp_dir);
        assert_eq!(read_manifest(&path).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_read_manifest_not_found() {
        let result = read_manifest(Path::new("/nonexistent/path/go.mod"));
        assert!(matches!(result, Err(ManifestError::ReadError { .. })));
    }

    #[test]
    fn test_replace_manifest_success_removes_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_go_mod(&temp_dir);

        replace_manifest(&path, "module example.com/changed\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "module example.com/changed\n"
        );
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_replace_failure_restores_original() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_go_mod(&temp_dir);

        let result = replace_with(&path, "garbage", |p, _| {
            // Leave a partial file behind before failing
            fs::write(p, "gar")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        let err = result.unwrap_err();
        assert!(matches!(err, ManifestError::WriteError { .. }));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(fs::read_to_string(&path).unwrap(), ORIGINAL);
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_failed_restore_names_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_go_mod(&temp_dir);
        let backup = backup_path(&path);

        // The backup vanishes before the write fails, so it cannot be moved back
        let result = replace_with(&path, "garbage", |_, _| {
            fs::remove_file(backup_path(&path))?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        let err = result.unwrap_err();
        assert!(matches!(err, ManifestError::RestoreError { .. }));
        let msg = err.to_string();
        assert!(msg.contains("disk full"));
        assert!(msg.contains(&backup.display().to_string()));
    }

    #[test]
    fn test_replace_missing_file_is_backup_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("go.mod");

        let result = replace_manifest(&path, "module m\n");
        assert!(matches!(result, Err(ManifestError::BackupError { .. })));
        assert!(!path.exists());
    }
}
