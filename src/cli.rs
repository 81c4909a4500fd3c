//! Command-line interface definitions for stringsweep.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Translate every quoted string of five characters or more into Danish
//! stringsweep ./site da
//!
//! # Preview without touching the files, logging each decision
//! stringsweep ./site da --dry-run -v
//!
//! # Only longer strings, skipping a vendored file
//! stringsweep ./site de --min-length 12 --exclude ./site/vendor/jquery.js
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::rewrite::{
    LiteralSubstitution, SpanSubstitution, SubstitutionStrategy, DEFAULT_MIN_LENGTH,
    DEFAULT_PATTERN,
};

/// Translate quoted string literals in a source tree in place.
///
/// stringsweep walks DIRECTORY, extracts quoted strings from `.php` and `.js`
/// files, translates them into TARGET_LANGUAGE through the Google Cloud
/// Translation API and rewrites each file. A copy of DIRECTORY is made
/// before anything changes.
#[derive(Debug, Parser)]
#[command(name = "stringsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to process
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Language code to translate into (e.g. da, de, fr)
    #[arg(value_name = "TARGET_LANGUAGE")]
    pub target_language: String,

    /// Minimum length, in characters, of strings to translate
    #[arg(long, alias = "min_length", value_name = "N", default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    /// Compute translations without writing any file
    #[arg(long, alias = "dry_run")]
    pub dry_run: bool,

    /// Pattern used to extract strings (first capture group is the text)
    #[arg(long, value_name = "PATTERN", default_value = DEFAULT_PATTERN)]
    pub regex: String,

    /// Paths to leave untouched (exact path as walked, can be repeated)
    #[arg(long, value_name = "PATH", num_args = 0..)]
    pub exclude: Vec<String>,

    /// How translations are substituted back into the file
    #[arg(long, value_enum, default_value = "literal")]
    pub strategy: StrategyArg,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log file to append to (default: translation_script.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API key for the translation service
    #[arg(long, value_name = "KEY", env = "STRINGSWEEP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Substitution strategy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyArg {
    /// Replace every quoted occurrence of each translated literal
    #[default]
    Literal,
    /// Replace only the exact spans that were matched
    Span,
}

impl StrategyArg {
    /// Build the substitution strategy.
    #[must_use]
    pub fn into_strategy(self) -> Box<dyn SubstitutionStrategy> {
        match self {
            Self::Literal => Box::new(LiteralSubstitution),
            Self::Span => Box::new(SpanSubstitution),
        }
    }
}

impl std::fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Span => write!(f, "span"),
        }
    }
}
