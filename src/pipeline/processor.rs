//! Per-file processing: hash gate, rewrite, write-back.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::cache::HashCache;
use crate::rewrite::{RewriteReport, Rewriter};
use crate::scanner::{HashError, Hasher};
use crate::translate::Translator;

/// Errors that stop one file from being processed.
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    /// The file could not be read as UTF-8 text.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// The rewritten content could not be written back.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The digest matched the recorded one; nothing was done.
    Unchanged,
    /// The file was rewritten on disk.
    Rewritten(RewriteReport),
    /// The file was rewritten in memory only.
    DryRun(RewriteReport),
    /// Processing failed; the file on disk is untouched.
    Failed(String),
}

impl FileOutcome {
    /// The rewrite report, when a rewrite happened.
    #[must_use]
    pub fn report(&self) -> Option<&RewriteReport> {
        match self {
            Self::Rewritten(report) | Self::DryRun(report) => Some(report),
            Self::Unchanged | Self::Failed(_) => None,
        }
    }
}

/// Processes single files against a shared rewriter, translator and cache.
pub struct FileProcessor<'a> {
    rewriter: &'a Rewriter,
    translator: &'a dyn Translator,
    cache: &'a HashCache,
    hasher: Hasher,
    target_language: &'a str,
    dry_run: bool,
}

impl<'a> FileProcessor<'a> {
    /// Create a processor.
    #[must_use]
    pub fn new(
        rewriter: &'a Rewriter,
        translator: &'a dyn Translator,
        cache: &'a HashCache,
        target_language: &'a str,
        dry_run: bool,
    ) -> Self {
        Self {
            rewriter,
            translator,
            cache,
            hasher: Hasher::new(),
            target_language,
            dry_run,
        }
    }

    /// Process one file.
    ///
    /// Never fails: any error is logged with the path and reported as
    /// [`FileOutcome::Failed`], leaving the file as it was.
    pub fn process(&self, path: &Path) -> FileOutcome {
        match self.try_process(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Error processing file {}: {}", path.display(), e);
                FileOutcome::Failed(e.to_string())
            }
        }
    }

    fn try_process(&self, path: &Path) -> Result<FileOutcome, ProcessError> {
        let content = fs::read_to_string(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let current = self.hasher.full_hash(path)?;
        if self.cache.is_unchanged(path, &current) {
            log::info!("Skipping unchanged file: {}", path.display());
            return Ok(FileOutcome::Unchanged);
        }

        let report = self
            .rewriter
            .rewrite(&content, self.target_language, self.translator);

        if self.dry_run {
            log::debug!(
                "Dry run: {} of {} strings in {} would be replaced",
                report.translated + report.failed,
                report.candidates,
                path.display()
            );
            log::info!("Translated file: {}", path.display());
            return Ok(FileOutcome::DryRun(report));
        }

        write_replacing(path, &report.content).map_err(|source| ProcessError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.cache.record(
            path.to_path_buf(),
            self.hasher.hash_bytes(report.content.as_bytes()),
        );

        log::info!("Translated file: {}", path.display());
        Ok(FileOutcome::Rewritten(report))
    }
}

/// Replace the file behind `path` with `content`.
///
/// The content goes to a temporary file next to the target, which is then
/// renamed over it, so a failure at any point leaves the original intact.
/// Symbolic links are resolved first and the target keeps its permissions.
/// Read-only files are refused.
fn write_replacing(path: &Path, content: &str) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let permissions = fs::metadata(&target)?.permissions();
    if permissions.readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file is read-only",
        ));
    }
    let dir = target
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "file has no parent"))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
