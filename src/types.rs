//! Core data model shared by the section parser, the citation segmenter,
//! the retrieval pipeline, and the API layer, plus the service-level error
//! type.
//!
//! The parsing and segmentation types here are plain data: construction is
//! cheap, everything is `Clone`, and none of them perform I/O or validation
//! beyond what their constructors state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// One page of pre-extracted document text, in reading order.
///
/// Page numbers are 1-based and follow the physical order of the source
/// document. A page that yielded no text still occupies its number; it just
/// contributes zero usable lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub lines: Vec<String>,
}

impl PageText {
    pub fn new(number: u32, lines: Vec<String>) -> Self {
        Self { number, lines }
    }

    /// Splits one page's raw text into lines. Convenience for loaders and
    /// tests; no trimming happens here, the parser trims per line.
    pub fn from_text(number: u32, text: &str) -> Self {
        Self {
            number,
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }
}

/// A hierarchically identified unit of source text.
///
/// `section_id` values need not be unique across a parsed sequence: source
/// material may interrupt and resume a section, and each span becomes its
/// own record. Name back-fill propagates a real title to every record
/// sharing the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Dot-separated numeric id such as `"5"` or `"5.1.1"`. `"5.1"` is a
    /// child of `"5"`.
    pub section_id: String,
    /// Inferred title, or the `"Section <id>"` placeholder when none could
    /// be inferred.
    pub section_name: String,
    /// 1-based page the section's header line appeared on.
    pub page: u32,
    /// Newline-joined, trimmed body text.
    pub body: String,
}

impl Section {
    /// Placeholder name synthesized when a header carries no usable title.
    pub fn placeholder_name(section_id: &str) -> String {
        format!("Section {section_id}")
    }

    /// Whether this record still carries the synthesized placeholder (or no
    /// name at all) and is therefore eligible for back-fill.
    pub fn has_placeholder_name(&self) -> bool {
        self.section_name.is_empty()
            || self.section_name == Self::placeholder_name(&self.section_id)
    }
}

/// One retrieval hit handed to the citation segmenter, in relevance order.
///
/// Produced by the query engine from store rows; the segmenter treats it as
/// opaque input and never fails on missing metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrievedSection {
    pub section_id: Option<String>,
    pub page: Option<u32>,
    pub text: String,
    pub score: Option<f32>,
}

/// One retrieved evidence span as exposed to API clients.
///
/// Index `i` in the citation list corresponds to the in-text marker
/// `[i + 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// `"Section <id>"`, or `"Unknown"` when the hit carried no section id.
    pub source: String,
    /// Evidence text with any leading `"Source <n>: "` prefix stripped and
    /// newlines collapsed to spaces.
    pub text: String,
    pub page: Option<u32>,
    pub score: Option<f32>,
}

/// A contiguous span of a generated answer: either literal text or a
/// validated citation marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// The span exactly as it appeared in the answer. Concatenating the
    /// `text` of all segments reconstructs the answer.
    pub text: String,
    /// 0-based index into the citation list, set only for validated markers.
    pub citation_index: Option<usize>,
    /// The matching [`Citation::source`], set only for validated markers.
    pub citation_reference: Option<String>,
}

impl TextSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citation_index: None,
            citation_reference: None,
        }
    }

    pub fn citation(
        text: impl Into<String>,
        citation_index: usize,
        citation_reference: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            citation_index: Some(citation_index),
            citation_reference: Some(citation_reference.into()),
        }
    }

    pub fn is_citation(&self) -> bool {
        self.citation_index.is_some()
    }
}

/// The final assembled answer artifact returned to API clients.
///
/// Immutable once constructed; no method mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// The original user query, verbatim.
    pub query: String,
    /// The generated answer, verbatim. `"Source n:"` boilerplate is only
    /// ever stripped inside individual [`Citation::text`] values, never
    /// here.
    pub response: String,
    pub response_segments: Vec<TextSegment>,
    pub citations: Vec<Citation>,
}

impl Output {
    pub fn new(
        query: impl Into<String>,
        response: impl Into<String>,
        response_segments: Vec<TextSegment>,
        citations: Vec<Citation>,
    ) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            response_segments,
            citations,
        }
    }
}

/// Errors raised by the service layer around the core transforms.
///
/// The parser and segmenter themselves are total and never produce one of
/// these; storage, embedding, generation, and I/O collaborators do.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("embedding error: {0}")]
    Embedding(String),
    #[error("generation error: {0}")]
    Generation(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_name_matches_id() {
        assert_eq!(Section::placeholder_name("5.1"), "Section 5.1");
    }

    #[test]
    fn placeholder_detection_is_per_id() {
        let section = Section {
            section_id: "5".into(),
            section_name: "Section 5".into(),
            page: 1,
            body: "text".into(),
        };
        assert!(section.has_placeholder_name());

        // "Section 5" is a real title when the record's own id differs.
        let other = Section {
            section_id: "6".into(),
            section_name: "Section 5".into(),
            page: 1,
            body: "text".into(),
        };
        assert!(!other.has_placeholder_name());
    }

    #[test]
    fn segment_constructors_set_linkage() {
        let plain = TextSegment::plain("hello");
        assert!(!plain.is_citation());
        assert_eq!(plain.citation_reference, None);

        let cited = TextSegment::citation("[1]", 0, "Section 5");
        assert!(cited.is_citation());
        assert_eq!(cited.citation_index, Some(0));
        assert_eq!(cited.citation_reference.as_deref(), Some("Section 5"));
    }

    #[test]
    fn output_round_trips_through_json() {
        let output = Output::new(
            "what happens if I steal?",
            "Stealing is punished. [1]",
            vec![
                TextSegment::plain("Stealing is punished. "),
                TextSegment::citation("[1]", 0, "Section 5.1"),
            ],
            vec![Citation {
                source: "Section 5.1".into(),
                text: "Theft is punishable by flogging.".into(),
                page: Some(2),
                score: Some(0.87),
            }],
        );

        let json = serde_json::to_string(&output).unwrap();
        let parsed: Output = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, output);
    }
}
