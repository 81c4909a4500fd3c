//! Backup of the target tree before any file is rewritten.
//!
//! The copy is a sibling of the target directory named by appending a fixed
//! suffix to the directory name (`site` becomes `site_backup`). An existing
//! backup is never overwritten: the run aborts instead.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that abort the backup stage.
#[derive(thiserror::Error, Debug)]
pub enum BackupError {
    /// The backup destination already exists.
    #[error("Backup destination already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The source is missing or not a directory.
    #[error("Cannot back up {0}: not a directory")]
    SourceMissing(PathBuf),

    /// Copying failed.
    #[error("Backup failed at {path}: {source}")]
    Io {
        /// Path being copied when the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Compute the backup location for `directory`.
///
/// Trailing separators are ignored, so `site/` and `site` both map to
/// `site_backup`.
#[must_use]
pub fn backup_path(directory: &Path, suffix: &str) -> PathBuf {
    // components() drops trailing separators and "." segments at the end
    let trimmed: PathBuf = directory.components().collect();
    let mut name: OsString = trimmed.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Copy `directory` recursively to its backup location.
///
/// Symbolic links are followed, so the backup holds real copies of linked
/// files and directories.
///
/// # Errors
///
/// Returns [`BackupError`] if the destination exists, the source is not a
/// directory, or any entry cannot be copied.
pub fn create_backup(directory: &Path, suffix: &str) -> Result<PathBuf, BackupError> {
    if !directory.is_dir() {
        return Err(BackupError::SourceMissing(directory.to_path_buf()));
    }

    let destination = backup_path(directory, suffix);
    if destination.exists() {
        return Err(BackupError::AlreadyExists(destination));
    }

    let mut files = 0usize;
    for entry in WalkDir::new(directory).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| directory.to_path_buf(), Path::to_path_buf);
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            BackupError::Io { path, source }
        })?;

        let relative = entry
            .path()
            .strip_prefix(directory)
            .unwrap_or_else(|_| entry.path());
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| BackupError::Io {
                path: target.clone(),
                source,
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|source| BackupError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            files += 1;
        }
    }

    log::debug!("Copied {} files into {}", files, destination.display());
    Ok(destination)
}
