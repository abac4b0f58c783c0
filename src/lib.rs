//! Retrieval-augmented question answering over numbered legal documents,
//! with verifiable per-sentence citations.
//!
//! ```text
//! Document text ──► ingestion::paginate ──► sections::parse ──► Section*
//!                                                       │
//!                            embeddings::EmbeddingProvider
//!                                                       │
//!                              stores::SectionStore ◄───┘ (vectors + rows)
//!                                       │
//! Query ──► engine::QueryEngine ────────┤ similarity search
//!                    │                  │
//!                    ├─► generation::AnswerGenerator (cited answer)
//!                    └─► citations::assemble_output ──► Output
//!
//! Output ──► api (axum): /query /feedback /health
//! ```
//!
//! The parsing and segmentation layers are pure and total: any input text
//! produces a value, malformed markers degrade to plain text, and nothing in
//! them panics or performs IO. Providers, stores, and the HTTP surface wrap
//! that core behind async traits.

pub mod api;
pub mod citations;
pub mod config;
pub mod embeddings;
pub mod engine;
pub mod generation;
pub mod ingestion;
pub mod sections;
pub mod stores;
pub mod types;

pub use citations::{assemble_output, citations_from_retrieved, segment, segment_answer};
pub use engine::QueryEngine;
pub use sections::parse;
pub use types::{Citation, Output, PageText, PipelineError, RetrievedSection, Section, TextSegment};
