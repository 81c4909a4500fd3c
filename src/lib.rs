//! stringsweep - In-place translation of quoted string literals
//!
//! Walks a source tree, extracts quoted strings from `.php` and `.js` files,
//! sends them through a translation service and writes the translated text
//! back into each file. Unchanged files are skipped by content digest, and
//! the tree is copied to a sibling backup before anything is rewritten.

pub mod backup;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod rewrite;
pub mod scanner;
pub mod translate;

use std::sync::Arc;

use anyhow::Context;
use yansi::Paint;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::ExitCode;
use crate::pipeline::{Pipeline, RunOptions, RunSummary};
use crate::progress::Progress;
use crate::rewrite::{Rewriter, StringPattern};
use crate::scanner::WalkerConfig;
use crate::translate::{GoogleTranslator, Translator};

/// Run the application with parsed arguments.
///
/// Loads settings, starts logging and builds the Google translator before
/// handing over to [`run`].
///
/// # Errors
///
/// Returns an error for anything that aborts the whole run: invalid
/// configuration, an unwritable log file, an invalid pattern, a failed
/// backup or an unreadable root directory.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Invalid configuration")?;
    settings.apply_cli(&cli);

    logging::init_logging(&settings.log_file, cli.verbose, cli.quiet).with_context(|| {
        format!("Cannot open log file {}", settings.log_file.display())
    })?;

    let translator =
        GoogleTranslator::from_settings(&settings).context("Cannot create translation client")?;

    let summary = run(&cli, &settings, Box::new(translator))?;
    Ok(summary.exit_code())
}

/// Back up the target directory and translate every eligible file in it.
///
/// # Errors
///
/// Returns an error if the pattern does not compile, the backup cannot be
/// created, or the directory cannot be walked. Per-file failures are
/// reported in the returned [`RunSummary`] instead.
pub fn run(
    cli: &Cli,
    settings: &Settings,
    translator: Box<dyn Translator>,
) -> anyhow::Result<RunSummary> {
    let pattern = StringPattern::new(&cli.regex)?;

    let backup = backup::create_backup(&cli.directory, &settings.backup_suffix)?;
    log::info!("Backup created at {}", backup.display());

    let rewriter =
        Rewriter::new(pattern, cli.min_length).with_strategy(cli.strategy.into_strategy());
    let pipeline = Pipeline::new(
        rewriter,
        translator,
        RunOptions::new(cli.target_language.clone(), cli.dry_run),
    )
    .with_progress(Arc::new(Progress::new(cli.quiet)));

    let walker_config = WalkerConfig::new(settings.extensions.clone(), cli.exclude.iter().cloned());
    let summary = pipeline.walk_and_process(&cli.directory, &walker_config)?;

    if !cli.quiet {
        print_summary(&summary, cli.dry_run);
    }
    log::info!("Translation process finished");

    Ok(summary)
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    let written = if dry_run {
        format!("{} would be rewritten", summary.dry_run)
    } else {
        format!("{} rewritten", summary.rewritten)
    };

    eprintln!(
        "{} {} files: {}, {} unchanged, {} failed",
        "Done.".green().bold(),
        summary.files,
        written,
        summary.unchanged,
        summary.failed
    );
    eprintln!(
        "      {} strings translated, {} kept after translation errors",
        summary.strings_translated, summary.translation_failures
    );
    for (path, message) in &summary.failures {
        eprintln!("  {} {}: {}", "failed".red(), path.display(), message);
    }
}
