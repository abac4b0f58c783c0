//! Section header recognition and title/content classification.

use std::sync::LazyLock;

use regex::Regex;

/// Remainders of this many characters or more are treated as content.
pub(crate) const TITLE_CHAR_LIMIT: usize = 60;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\.?\s*(.*)$").unwrap());

/// A line recognized as a section header: its numeric id and whatever text
/// followed it on the same line (trimmed, possibly empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Heading<'a> {
    pub id: &'a str,
    pub remainder: &'a str,
}

/// How the trailing text on a header line should be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Remainder {
    /// Short, no trailing period: carries the section's title.
    Title,
    /// Anything else: the first line of the section's body.
    Content,
}

/// Matches the header shape: dot-separated digit groups, an optional
/// trailing period, then optional same-line text.
///
/// `"5. Trials"` and `"5 Trials"` both yield id `"5"` and remainder
/// `"Trials"`; a bare `"5"` yields an empty remainder. Expects `line` to be
/// pre-trimmed.
pub(crate) fn match_heading(line: &str) -> Option<Heading<'_>> {
    let caps = HEADING_RE.captures(line)?;
    let id = caps.get(1)?.as_str();
    let remainder = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some(Heading { id, remainder })
}

/// Title heuristic: under [`TITLE_CHAR_LIMIT`] characters and no trailing
/// period. Long remainders and sentence-like remainders are body content
/// that happened to share the header's line.
pub(crate) fn classify(remainder: &str) -> Remainder {
    if remainder.chars().count() < TITLE_CHAR_LIMIT && !remainder.ends_with('.') {
        Remainder::Title
    } else {
        Remainder::Content
    }
}
