//! Directive extraction.
//!
//! Turns the raw text of a directive document into a [`DirectiveSet`]:
//! - Lines are split on the first `:` only; lines without a colon are ignored
//! - Only `User-agent`, `Allow` and `Disallow` are recognised (case-sensitive)
//! - Names and values are trimmed
//! - A repeated name keeps its last value
//!
//! Extraction never fails. Anything it does not understand is dropped.

use provenant_core::{DirectiveName, DirectiveSet};

/// Extracts the recognised directives from a directive document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveExtractor;

impl DirectiveExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a directive set from document text.
    ///
    /// Empty text (including an unavailable document) yields an empty set.
    pub fn extract(&self, text: &str) -> DirectiveSet {
        let mut directives = DirectiveSet::new();
        let mut ignored = 0usize;

        for line in text.lines() {
            match parse_line(line) {
                Some((name, value)) => directives.insert(name, value),
                None => ignored += 1,
            }
        }

        tracing::trace!(
            recognised = directives.len(),
            ignored,
            "Extracted directives"
        );

        directives
    }
}

/// Extract a directive set from document text with the default extractor.
pub fn extract_directives(text: &str) -> DirectiveSet {
    DirectiveExtractor::new().extract(text)
}

fn parse_line(line: &str) -> Option<(DirectiveName, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim().parse().ok()?;
    Some((name, value.trim()))
}
