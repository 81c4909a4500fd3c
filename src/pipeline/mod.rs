//! Directory-wide translation pipeline.
//!
//! # Overview
//!
//! [`Pipeline::walk_and_process`] enumerates eligible files with the
//! [`Walker`], then fans the files out over a rayon pool sized by the
//! host's available parallelism. Each file goes through a
//! [`FileProcessor`] independently; the call returns once every file has
//! finished, with a [`RunSummary`] folded from the per-file outcomes.
//!
//! # Ownership
//!
//! The pipeline owns the [`HashCache`] for its whole lifetime, so calling
//! `walk_and_process` twice on the same pipeline skips files that have not
//! changed since the first call. Nothing outlives the process.
//!
//! # Example
//!
//! ```no_run
//! use stringsweep::pipeline::{Pipeline, RunOptions};
//! use stringsweep::rewrite::{Rewriter, StringPattern};
//! use stringsweep::scanner::WalkerConfig;
//! use stringsweep::translate::GoogleTranslator;
//! use std::path::Path;
//!
//! let translator = GoogleTranslator::new(
//!     stringsweep::translate::google::DEFAULT_ENDPOINT,
//!     None,
//!     None,
//! )?;
//! let pipeline = Pipeline::new(
//!     Rewriter::new(StringPattern::default(), 5),
//!     Box::new(translator),
//!     RunOptions::new("da", false),
//! );
//! let summary = pipeline.walk_and_process(Path::new("./site"), &WalkerConfig::default())?;
//! println!("{} files rewritten", summary.rewritten);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod processor;

pub use processor::{FileOutcome, FileProcessor, ProcessError};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::cache::HashCache;
use crate::error::ExitCode;
use crate::progress::{ProgressCallback, PHASE_TRANSLATING, PHASE_WALKING};
use crate::rewrite::Rewriter;
use crate::scanner::{ScanError, Walker, WalkerConfig};
use crate::translate::Translator;

/// Errors that abort a whole pipeline run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The root directory could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The worker pool could not be created.
    #[error("Failed to create worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Per-run options shared by every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Language code to translate into.
    pub target_language: String,
    /// Compute everything but leave files on disk untouched.
    pub dry_run: bool,
}

impl RunOptions {
    /// Create run options.
    #[must_use]
    pub fn new(target_language: impl Into<String>, dry_run: bool) -> Self {
        Self {
            target_language: target_language.into(),
            dry_run,
        }
    }
}

/// Totals for one `walk_and_process` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Eligible files handed to processing.
    pub files: usize,
    /// Files rewritten on disk.
    pub rewritten: usize,
    /// Files skipped because their digest was unchanged.
    pub unchanged: usize,
    /// Files rewritten in memory only (dry run).
    pub dry_run: usize,
    /// Files that could not be processed.
    pub failed: usize,
    /// Strings translated successfully.
    pub strings_translated: usize,
    /// Strings whose translation failed and were kept as they were.
    pub translation_failures: usize,
    /// Entries the walker could not read.
    pub scan_errors: usize,
    /// Failed files with their error message.
    pub failures: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// Fold one file's outcome into the totals.
    pub fn merge(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.files += 1;
        if let Some(report) = outcome.report() {
            self.strings_translated += report.translated;
            self.translation_failures += report.failed;
        }
        match outcome {
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::Rewritten(_) => self.rewritten += 1,
            FileOutcome::DryRun(_) => self.dry_run += 1,
            FileOutcome::Failed(message) => {
                self.failed += 1;
                self.failures.push((path, message));
            }
        }
    }

    /// Exit code for this run.
    ///
    /// Per-file failures make the run a partial success; failed
    /// translations alone do not.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.failed > 0 {
            ExitCode::PartialSuccess
        } else {
            ExitCode::Success
        }
    }
}

/// Rewriter, translator and change-detection cache for one invocation.
pub struct Pipeline {
    rewriter: Rewriter,
    translator: Box<dyn Translator>,
    cache: HashCache,
    options: RunOptions,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl Pipeline {
    /// Create a pipeline with an empty cache.
    #[must_use]
    pub fn new(rewriter: Rewriter, translator: Box<dyn Translator>, options: RunOptions) -> Self {
        Self {
            rewriter,
            translator,
            cache: HashCache::new(),
            options,
            progress: None,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The change-detection cache.
    #[must_use]
    pub fn cache(&self) -> &HashCache {
        &self.cache
    }

    /// Translate every eligible file under `root`.
    ///
    /// Files are processed concurrently in no particular order; within a
    /// file, hashing, rewriting and writing are sequential. A failing file
    /// never stops the others.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Scan`] if `root` is missing or not a
    /// directory, and [`PipelineError::ThreadPool`] if the pool cannot start.
    pub fn walk_and_process(
        &self,
        root: &Path,
        config: &WalkerConfig,
    ) -> Result<RunSummary, PipelineError> {
        let walker = Walker::new(root, config.clone());
        walker.validate_root()?;

        if let Some(ref progress) = self.progress {
            progress.on_phase_start(PHASE_WALKING, 0);
        }

        let mut summary = RunSummary::default();
        let mut files = Vec::new();
        for entry in walker.walk() {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    summary.scan_errors += 1;
                }
            }
        }

        if let Some(ref progress) = self.progress {
            progress.on_phase_end(PHASE_WALKING);
            progress.on_phase_start(PHASE_TRANSLATING, files.len());
        }

        log::info!(
            "Processing {} files under {} into '{}' ({} strategy, min length {}{})",
            files.len(),
            root.display(),
            self.options.target_language,
            self.rewriter.strategy_name(),
            self.rewriter.min_length(),
            if self.options.dry_run { ", dry run" } else { "" }
        );

        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("stringsweep-worker-{i}"))
            .build()?;

        let processor = FileProcessor::new(
            &self.rewriter,
            self.translator.as_ref(),
            &self.cache,
            &self.options.target_language,
            self.options.dry_run,
        );
        let done = AtomicUsize::new(0);

        let outcomes: Vec<(PathBuf, FileOutcome)> = pool.install(|| {
            files
                .into_par_iter()
                .map(|path| {
                    let outcome = processor.process(&path);
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(ref progress) = self.progress {
                        progress.on_progress(finished, path.to_string_lossy().as_ref());
                    }
                    (path, outcome)
                })
                .collect()
        });

        for (path, outcome) in outcomes {
            summary.merge(path, outcome);
        }

        if let Some(ref progress) = self.progress {
            progress.on_phase_end(PHASE_TRANSLATING);
        }

        log::info!(
            "Finished: {} rewritten, {} unchanged, {} dry run, {} failed, {} strings translated, {} translation failures",
            summary.rewritten,
            summary.unchanged,
            summary.dry_run,
            summary.failed,
            summary.strings_translated,
            summary.translation_failures
        );

        Ok(summary)
    }
}
