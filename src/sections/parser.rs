//! Forward scan turning paginated lines into [`Section`] records, plus the
//! name back-fill pass.

use rustc_hash::FxHashMap;

use super::heading::{self, Heading, Remainder};
use crate::types::{PageText, Section};

/// The section currently being accumulated by the scan.
struct OpenSection {
    id: String,
    name: Option<String>,
    lines: Vec<String>,
    page: u32,
}

impl OpenSection {
    fn start(heading: Heading<'_>, page: u32) -> Self {
        let mut name = None;
        let mut lines = Vec::new();
        match heading::classify(heading.remainder) {
            Remainder::Title if !heading.remainder.is_empty() => {
                name = Some(heading.remainder.to_string());
            }
            _ => {
                if !heading.remainder.is_empty() {
                    lines.push(heading.remainder.to_string());
                }
            }
        }
        Self {
            id: heading.id.to_string(),
            name,
            lines,
            page,
        }
    }

    /// Finalizes the accumulator. Sections that gathered no body text are
    /// dropped rather than emitted empty.
    fn finish(self) -> Option<Section> {
        if self.lines.is_empty() {
            return None;
        }
        let body = self.lines.join("\n").trim().to_string();
        if body.is_empty() {
            return None;
        }
        let name = self
            .name
            .unwrap_or_else(|| Section::placeholder_name(&self.id));
        Some(Section {
            section_id: self.id,
            section_name: name,
            page: self.page,
            body,
        })
    }
}

/// Parses pre-extracted pages into an ordered sequence of sections.
///
/// Single forward pass: blank lines are skipped, a header line flushes the
/// open accumulator (when it holds body text) and starts a new one, and any
/// other line joins the open accumulator. Lines arriving before the first
/// header have no section to join and are dropped; surfacing them as an
/// unparsed preamble is left for a future revision.
///
/// Total over its input: never panics, and an input with no recognizable
/// headers simply parses to an empty vector.
///
/// # Examples
///
/// ```
/// use lawsmith::sections;
/// use lawsmith::types::PageText;
///
/// let pages = vec![PageText::from_text(
///     1,
///     "5 Trials by combat\nAny man may demand trial by combat.",
/// )];
/// let sections = sections::parse(&pages);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].section_name, "Trials by combat");
/// assert_eq!(sections[0].body, "Any man may demand trial by combat.");
/// ```
pub fn parse(pages: &[PageText]) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;

    for page in pages {
        for raw in &page.lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(heading) = heading::match_heading(line) {
                if let Some(done) = open.take().and_then(OpenSection::finish) {
                    sections.push(done);
                }
                open = Some(OpenSection::start(heading, page.number));
            } else if let Some(current) = open.as_mut() {
                current.lines.push(line.to_string());
            }
        }
    }

    if let Some(done) = open.and_then(OpenSection::finish) {
        sections.push(done);
    }

    back_fill_names(&mut sections);
    sections
}

/// Propagates inferred titles to placeholder-named records sharing an id.
///
/// Two explicit passes: collect the first real title per id, then rewrite.
/// A later occurrence of an id may supply the title for an earlier one, so
/// this cannot fold into the scan.
fn back_fill_names(sections: &mut [Section]) {
    let mut titles: FxHashMap<String, String> = FxHashMap::default();
    for section in sections.iter() {
        if !section.has_placeholder_name() && !titles.contains_key(&section.section_id) {
            titles.insert(section.section_id.clone(), section.section_name.clone());
        }
    }

    for section in sections.iter_mut() {
        if section.has_placeholder_name() {
            if let Some(title) = titles.get(&section.section_id) {
                section.section_name = title.clone();
            }
        }
    }
}
