//! String extraction and rewriting.
//!
//! # Architecture
//!
//! * [`pattern`]: compiles the extraction pattern and finds candidates.
//! * [`strategy`]: turns translated candidates into rewritten content.
//!
//! [`Rewriter`] ties them together: every candidate at or above the minimum
//! length is sent to the translator, one call per match, and the results are
//! handed to the configured [`SubstitutionStrategy`]. Translated text is
//! always written back double-quoted, whatever quote the original used.
//!
//! Rewriting is not idempotent. Running it again over its own output sends
//! the already translated strings to the translator a second time.

pub mod pattern;
pub mod strategy;

pub use pattern::{Candidate, PatternError, StringPattern, DEFAULT_PATTERN};
pub use strategy::{
    replace_quoted_literal, LiteralSubstitution, SpanSubstitution, Substitution,
    SubstitutionStrategy,
};

use crate::translate::{translate_or_original, Translator};

/// Default minimum candidate length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 5;

/// Result of rewriting one file's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// The rewritten content.
    pub content: String,
    /// Number of candidates matched by the pattern.
    pub candidates: usize,
    /// Candidates translated successfully.
    pub translated: usize,
    /// Candidates whose translation failed and were kept as they were.
    pub failed: usize,
    /// Candidates shorter than the minimum length, never sent out.
    pub skipped_short: usize,
    /// Candidates the strategy cannot substitute, never sent out.
    pub skipped_unreplaceable: usize,
}

/// Extracts candidate strings, translates them and substitutes the results.
#[derive(Debug)]
pub struct Rewriter {
    pattern: StringPattern,
    min_length: usize,
    strategy: Box<dyn SubstitutionStrategy>,
}

impl Rewriter {
    /// Create a rewriter using [`LiteralSubstitution`].
    #[must_use]
    pub fn new(pattern: StringPattern, min_length: usize) -> Self {
        Self {
            pattern,
            min_length,
            strategy: Box::new(LiteralSubstitution),
        }
    }

    /// Replace the substitution strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn SubstitutionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Minimum candidate length.
    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Name of the active strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Rewrite `content`, translating qualifying candidates into
    /// `target_language`.
    ///
    /// Failed translations fall back to the original text (see
    /// [`translate_or_original`]) and are counted in the report.
    pub fn rewrite(
        &self,
        content: &str,
        target_language: &str,
        translator: &dyn Translator,
    ) -> RewriteReport {
        let candidates = self.pattern.candidates(content);
        let mut report = RewriteReport {
            candidates: candidates.len(),
            ..Default::default()
        };

        let mut substitutions = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            if !candidate.qualifies(self.min_length) {
                log::trace!("Skipping short string {:?}", candidate.text);
                report.skipped_short += 1;
                continue;
            }
            if !self.strategy.can_replace(candidate.text) {
                log::debug!(
                    "Skipping {:?}: the {} strategy cannot replace it",
                    candidate.text,
                    self.strategy.name()
                );
                report.skipped_unreplaceable += 1;
                continue;
            }

            let (text, ok) = translate_or_original(translator, candidate.text, target_language);
            if ok {
                report.translated += 1;
            } else {
                report.failed += 1;
            }

            substitutions.push(Substitution {
                original: candidate.text,
                span: candidate.span.clone(),
                replacement: format!("\"{text}\""),
            });
        }

        report.content = self.strategy.apply(content, &substitutions);
        report
    }
}
