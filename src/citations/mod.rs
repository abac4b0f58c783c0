//! Answer segmentation and citation resolution.
//!
//! ```text
//! answer ──► split on [n] markers ──► TextSegment*
//!                                        │
//! retrieved sections ──► Citation* ◄─────┘ (1-based lookup)
//! ```
//!
//! Both halves are pure: no IO, no shared state, and every input produces a
//! value. Malformed or out-of-range markers survive as plain text.

pub mod markers;
mod segmenter;

pub use segmenter::{
    assemble_output, citations_from_retrieved, segment, segment_answer, SegmentedAnswer,
};
