//! Substitution strategies.
//!
//! A strategy receives the original content and the list of translated
//! candidates, in match order, and produces the rewritten content.

use std::fmt::Debug;
use std::ops::Range;

use super::pattern::is_escaped;

/// One translated candidate ready to be substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution<'a> {
    /// The candidate text as matched (without quotes).
    pub original: &'a str,
    /// Byte span of the whole match in the original content.
    pub span: Range<usize>,
    /// Text to insert, already wrapped in double quotes.
    pub replacement: String,
}

/// Turns a list of substitutions into rewritten content.
pub trait SubstitutionStrategy: Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply `substitutions` to `content`.
    fn apply(&self, content: &str, substitutions: &[Substitution<'_>]) -> String;

    /// Whether a candidate with this text can be substituted at all.
    ///
    /// Candidates that cannot are never sent to the translator.
    fn can_replace(&self, _original: &str) -> bool {
        true
    }
}

/// Replace every quoted occurrence of each candidate, anywhere in the file.
///
/// Substitutions are applied one after another to the evolving content, so
/// a literal that appears in several places gets the same translation in all
/// of them, and a later substitution can match text produced by an earlier
/// one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralSubstitution;

impl SubstitutionStrategy for LiteralSubstitution {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn apply(&self, content: &str, substitutions: &[Substitution<'_>]) -> String {
        let mut current = content.to_string();
        for sub in substitutions {
            current = replace_quoted_literal(&current, sub.original, &sub.replacement);
        }
        current
    }

    fn can_replace(&self, original: &str) -> bool {
        !original.ends_with('\\')
    }
}

/// Replace only the spans that were matched, by position.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanSubstitution;

impl SubstitutionStrategy for SpanSubstitution {
    fn name(&self) -> &'static str {
        "span"
    }

    fn apply(&self, content: &str, substitutions: &[Substitution<'_>]) -> String {
        let mut sorted: Vec<&Substitution<'_>> = substitutions.iter().collect();
        sorted.sort_by_key(|s| s.span.start);

        let mut output = String::with_capacity(content.len());
        let mut last = 0;
        for sub in sorted {
            // Candidates never overlap, but guard against hand-built input
            if sub.span.start < last || sub.span.end > content.len() {
                continue;
            }
            output.push_str(&content[last..sub.span.start]);
            output.push_str(&sub.replacement);
            last = sub.span.end;
        }
        output.push_str(&content[last..]);
        output
    }
}

fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

/// Replace each `<quote>literal<quote>` in `content` with `replacement`.
///
/// Either quote character is accepted on either side. An occurrence whose
/// opening quote follows a backslash is left alone, and a literal ending in
/// a backslash is never replaced because its closing quote would be escaped.
/// The replacement is inserted verbatim.
pub fn replace_quoted_literal(content: &str, literal: &str, replacement: &str) -> String {
    if literal.ends_with('\\') {
        return content.to_string();
    }

    let bytes = content.as_bytes();
    let needle_len = literal.len() + 2;
    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    let mut pos = 0;

    while pos + needle_len <= bytes.len() {
        let Some(offset) = bytes[pos..].iter().position(|&b| is_quote(b)) else {
            break;
        };
        let open = pos + offset;
        let close = open + 1 + literal.len();

        let matches = close < bytes.len()
            && is_quote(bytes[close])
            && content[open + 1..].starts_with(literal)
            && !is_escaped(content, open);

        if matches {
            output.push_str(&content[last..open]);
            output.push_str(replacement);
            last = close + 1;
            pos = close + 1;
        } else {
            pos = open + 1;
        }
    }

    output.push_str(&content[last..]);
    output
}
