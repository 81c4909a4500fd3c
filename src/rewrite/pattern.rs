//! Candidate string extraction.

use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Default extraction pattern.
///
/// A single- or double-quoted string with a lazy interior. A backslash
/// escapes the character after it, so `\"` never closes the string. Either
/// quote character may close a string opened by the other.
pub const DEFAULT_PATTERN: &str = r#"["']((?:\\.|[^\\\n])*?)["']"#;

static QUOTED_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_PATTERN).expect("default pattern is valid"));

/// Errors raised while compiling an extraction pattern.
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    /// The pattern is not valid `regex` syntax.
    #[error("Invalid string pattern '{pattern}': {source}")]
    Invalid {
        /// The rejected pattern
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },
}

/// A string matched by the extraction pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Text handed to the translator: capture group 1, or the whole match
    /// when the pattern has no groups.
    pub text: &'a str,
    /// Byte span of the quoted literal: the candidate text plus the quote
    /// characters directly around it, or the whole match when the text is
    /// not a capture group.
    pub span: Range<usize>,
}

impl Candidate<'_> {
    /// Length of the candidate text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the candidate is long enough to be translated.
    #[must_use]
    pub fn qualifies(&self, min_length: usize) -> bool {
        self.char_len() >= min_length
    }
}

/// Compiled extraction pattern.
///
/// The `regex` crate has no lookbehind, so the rule that a string may not
/// open right after a backslash is enforced here for every pattern: such a
/// match is discarded and the scan resumes one character later.
#[derive(Debug, Clone)]
pub struct StringPattern {
    regex: Regex,
}

impl StringPattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Invalid`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// The pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Find all non-overlapping candidates in `content`, left to right.
    #[must_use]
    pub fn candidates<'a>(&self, content: &'a str) -> Vec<Candidate<'a>> {
        let has_group = self.regex.captures_len() > 1;
        let mut found = Vec::new();
        let mut pos = 0;

        while pos <= content.len() {
            let Some(caps) = self.regex.captures_at(content, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if is_escaped(content, whole.start()) {
                pos = next_char_boundary(content, whole.start());
                continue;
            }

            let (text, span) = match caps.get(1) {
                Some(group) if has_group => (
                    group.as_str(),
                    quoted_span(content, group.range(), whole.range()),
                ),
                _ if has_group => ("", whole.range()),
                _ => (whole.as_str(), whole.range()),
            };
            found.push(Candidate { text, span });

            pos = if whole.is_empty() {
                next_char_boundary(content, whole.end())
            } else {
                whole.end()
            };
        }

        found
    }
}

impl Default for StringPattern {
    fn default() -> Self {
        Self {
            regex: QUOTED_STRING_REGEX.clone(),
        }
    }
}

impl FromStr for StringPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Whether the byte at `index` is directly preceded by a backslash.
pub(crate) fn is_escaped(content: &str, index: usize) -> bool {
    content[..index].ends_with('\\')
}

/// Widen `range` to include a quote character on either side, without
/// leaving `bounds`.
fn quoted_span(content: &str, range: Range<usize>, bounds: Range<usize>) -> Range<usize> {
    let bytes = content.as_bytes();
    let is_quote = |b: u8| b == b'"' || b == b'\'';
    let start = if range.start > bounds.start && is_quote(bytes[range.start - 1]) {
        range.start - 1
    } else {
        range.start
    };
    let end = if range.end < bounds.end && is_quote(bytes[range.end]) {
        range.end + 1
    } else {
        range.end
    };
    start..end
}

/// Byte index of the character after the one starting at `index`.
fn next_char_boundary(content: &str, index: usize) -> usize {
    content[index..]
        .chars()
        .next()
        .map_or(content.len() + 1, |c| index + c.len_utf8())
}
