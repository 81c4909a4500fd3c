//! Logging infrastructure for stringsweep.
//!
//! This module provides structured logging using the `log` facade and the
//! `env_logger` backend, writing to an append-mode log file rather than the
//! terminal. Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (error only) or `--verbose` (debug/trace)
//! 3. Default: info level
//!
//! Every line has the form `<timestamp> - <LEVEL> - <message>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use stringsweep::logging::init_logging;
//! use std::path::Path;
//!
//! init_logging(Path::new("translation_script.log"), 1, false)
//!     .expect("log file should be writable");
//! log::info!("Backup created");
//! ```

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Initialize the logging subsystem.
///
/// Only the first successful call installs a logger; later calls keep the
/// existing one and return `Ok`.
///
/// # Arguments
///
/// * `log_file` - File to append log lines to (created if missing)
/// * `verbose` - Verbosity count from CLI (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, only errors are logged (overridden by RUST_LOG)
///
/// # Errors
///
/// Returns an I/O error if the log file cannot be opened for appending.
pub fn init_logging(log_file: &Path, verbose: u8, quiet: bool) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let use_env = env::var("RUST_LOG").is_ok();
    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging initialized at level {} into {}",
            current_level_name(),
            log_file.display()
        );
    }
    Ok(())
}

/// Determine the log level from CLI flags.
///
/// # Arguments
///
/// * `verbose` - Verbosity count (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, use error level
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Get the current log level as a string.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
