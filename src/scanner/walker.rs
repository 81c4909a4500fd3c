//! Directory walker implementation using jwalk for parallel traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a source tree
//! and yielding every file that should be handed to translation. It uses
//! [`jwalk`] for parallel directory reading.
//!
//! # Eligibility
//!
//! A file is yielded when its name ends with `.<ext>` for one of the
//! configured extensions and its path, rendered as a string, is not an exact
//! member of the exclusion set. Hidden files are included. Symbolic links to
//! regular files are yielded; links to directories are not descended into.
//!
//! # Example
//!
//! ```no_run
//! use stringsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("./site"), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} source files", files.len());
//! ```

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{ScanError, WalkerConfig};

/// Directory walker for source file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Verify that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] or [`ScanError::NotADirectory`].
    pub fn validate_root(&self) -> Result<(), ScanError> {
        match std::fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) => Err(self.handle_io_error(&self.root, e)),
        }
    }

    /// Check whether a file name carries one of the configured extensions.
    fn has_eligible_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        self.config.extensions.iter().any(|ext| {
            name.len() > ext.len()
                && name.ends_with(ext.as_str())
                && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
        })
    }

    /// Check whether a path is in the exclusion set.
    fn is_excluded(&self, path: &Path) -> bool {
        self.config
            .excluded
            .contains(path.to_string_lossy().as_ref())
    }

    /// Walk the directory tree, yielding eligible file paths.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. Children are visited in name order so the file list is
    /// deterministic, although processing order is not.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        walk_dir.into_iter().filter_map(move |entry_result| match entry_result {
            Ok(entry) => {
                let path = entry.path();

                // Skip the root directory itself
                if path == self.root {
                    return None;
                }

                let file_type = entry.file_type();
                if file_type.is_dir() {
                    return None;
                }

                if !self.has_eligible_extension(&path) {
                    log::trace!("Skipping file with other extension: {}", path.display());
                    return None;
                }

                // Links count when they resolve to a regular file
                if file_type.is_symlink() {
                    match std::fs::metadata(&path) {
                        Ok(metadata) if metadata.is_file() => {}
                        Ok(_) => return None,
                        Err(e) => return Some(Err(self.handle_io_error(&path, e))),
                    }
                } else if !file_type.is_file() {
                    return None;
                }

                if self.is_excluded(&path) {
                    log::debug!("Excluded file: {}", path.display());
                    return None;
                }

                Some(Ok(path))
            }
            Err(e) => {
                let path = e
                    .path()
                    .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                Some(Err(self.handle_jwalk_error(path, e)))
            }
        })
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: &Path, error: std::io::Error) -> ScanError {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path.to_path_buf())
            }
            ErrorKind::NotFound => {
                log::debug!("Path not found: {}", path.display());
                ScanError::NotFound(path.to_path_buf())
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
                ScanError::Io {
                    path: path.to_path_buf(),
                    source: error,
                }
            }
        }
    }

    /// Handle jwalk errors.
    fn handle_jwalk_error(&self, path: PathBuf, error: jwalk::Error) -> ScanError {
        log::warn!("Walker error for {}: {}", path.display(), error);
        ScanError::Io {
            path,
            source: std::io::Error::other(error.to_string()),
        }
    }
}
