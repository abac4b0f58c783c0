//! Turns a generated answer plus its retrieved sections into segments and
//! citation records.
//!
//! Marker numbers are 1-based references into the retrieval list. A marker
//! whose number has no matching citation is kept as plain text rather than
//! dropped, so the answer never loses characters.

use std::sync::LazyLock;

use regex::Regex;

use crate::citations::markers::{marker_number, split_markers};
use crate::types::{Citation, Output, RetrievedSection, TextSegment};

static SOURCE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Source \d+:\s*").unwrap());

/// Segments paired with the citations their markers point into.
#[derive(Debug, Clone, Default)]
pub struct SegmentedAnswer {
    pub segments: Vec<TextSegment>,
    pub citations: Vec<Citation>,
}

/// Builds one citation per retrieved section, preserving retrieval order.
///
/// The label is `Section <id>` when the hit carries a non-empty section id
/// and `Unknown` otherwise. Any `Source <n>: ` prefix left over from prompt
/// construction is stripped and newlines are flattened to spaces.
pub fn citations_from_retrieved(retrieved: &[RetrievedSection]) -> Vec<Citation> {
    retrieved
        .iter()
        .map(|hit| {
            let source = match hit.section_id.as_deref() {
                Some(id) if !id.is_empty() => format!("Section {id}"),
                _ => "Unknown".to_string(),
            };
            let text = SOURCE_PREFIX_RE
                .replace(&hit.text, "")
                .replace('\n', " ")
                .trim()
                .to_string();
            Citation {
                source,
                text,
                page: hit.page,
                score: hit.score,
            }
        })
        .collect()
}

/// Splits `answer` on citation markers and resolves each against `citations`.
///
/// Marker `[n]` resolves to `citations[n - 1]`; out-of-range numbers
/// (including `[0]`) degrade to plain segments. Concatenating the segment
/// texts reproduces `answer` up to pieces that were empty to begin with.
pub fn segment_answer(answer: &str, citations: &[Citation]) -> Vec<TextSegment> {
    split_markers(answer)
        .into_iter()
        .map(|piece| {
            let resolved = marker_number(piece)
                .and_then(|n| n.checked_sub(1))
                .filter(|index| *index < citations.len());
            match resolved {
                Some(index) => {
                    TextSegment::citation(piece, index, citations[index].source.clone())
                }
                None => TextSegment::plain(piece),
            }
        })
        .collect()
}

/// Runs both halves: citation construction, then marker resolution.
pub fn segment(answer: &str, retrieved: &[RetrievedSection]) -> SegmentedAnswer {
    let citations = citations_from_retrieved(retrieved);
    let segments = segment_answer(answer, &citations);
    SegmentedAnswer {
        segments,
        citations,
    }
}

/// Assembles the full response payload for one answered query.
///
/// `response` carries the answer verbatim, markers included, so callers that
/// ignore segmentation still see the raw text.
pub fn assemble_output(query: &str, answer: &str, retrieved: &[RetrievedSection]) -> Output {
    let SegmentedAnswer {
        segments,
        citations,
    } = segment(answer, retrieved);
    Output::new(query, answer, segments, citations)
}
