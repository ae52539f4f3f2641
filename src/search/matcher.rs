//! Literal, case-insensitive line matching.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

use crate::error::Result;

/// Matches a literal search text against single lines.
///
/// The text is escaped before compilation, so `a.b*c` only ever matches
/// those five characters. Matching ignores case (Unicode-aware). In
/// whole-word mode the text must sit between word boundaries. An empty text
/// matches at the start of every line.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    text: String,
    whole_word: bool,
    regex: Regex,
}

impl LiteralMatcher {
    pub fn new(text: &str, whole_word: bool) -> Result<Self> {
        let escaped = regex::escape(text);
        let pattern = if whole_word {
            format!(r"\b{}\b", escaped)
        } else {
            escaped
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()?;
        log::debug!("Compiled matcher for '{}' as /{}/i", text, pattern);
        Ok(Self {
            text: text.to_string(),
            whole_word,
            regex,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_whole_word(&self) -> bool {
        self.whole_word
    }

    /// Byte span of the leftmost match in `line`, if any.
    pub fn find(&self, line: &str) -> Option<Range<usize>> {
        self.regex.find(line).map(|m| m.range())
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}
