//! Storage backends for parsed sections and their embeddings.
//!
//! A single [`SectionStore`] trait abstracts over the concrete backends so
//! ingestion and querying never depend on a specific database.
//!
//! # Architecture
//!
//! ```text
//!                 ┌────────────────────┐
//!                 │  SectionStore      │
//!                 │  (async trait)     │
//!                 └─────────┬──────────┘
//!                           │
//!                ┌──────────┴──────────┐
//!                ▼                     ▼
//!        ┌───────────────┐     ┌───────────────┐
//!        │    SQLite     │     │   In-memory   │
//!        │  sqlite-vec   │     │  (tests/dev)  │
//!        └───────────────┘     └───────────────┘
//! ```
//!
//! Only records carrying an embedding are inserted; similarity search is
//! cosine-based and returns results ranked best first.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{PipelineError, Section};

pub use memory::MemorySectionStore;
pub use sqlite::SqliteSectionStore;

/// A stored section with its embedding, ready for persistence.
///
/// Backend-agnostic shape shared by every [`SectionStore`] implementation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Unique identifier for this record.
    pub id: String,
    /// Dot-separated section number, e.g. `"12.4"`.
    pub section_id: String,
    /// Section title, or the placeholder when none was found.
    pub section_name: String,
    /// 1-based page the section header appeared on.
    pub page: Option<u32>,
    /// The section body text.
    pub content: String,
    /// The embedding vector (if computed).
    pub embedding: Option<Vec<f32>>,
}

impl SectionRecord {
    pub fn new(
        id: impl Into<String>,
        section_id: impl Into<String>,
        section_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            section_id: section_id.into(),
            section_name: section_name.into(),
            page: None,
            content: content.into(),
            embedding: None,
        }
    }

    /// Builds a record from a parsed section, minting a fresh id.
    pub fn from_section(section: &Section) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            section_id: section.section_id.clone(),
            section_name: section.section_name.clone(),
            page: Some(section.page),
            content: section.body.clone(),
            embedding: None,
        }
    }

    /// Set the embedding vector.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// Unified interface for section storage backends.
///
/// Implementations persist section records alongside their vectors and run
/// cosine similarity search over them.
#[async_trait]
pub trait SectionStore: Send + Sync {
    /// Insert section records into the store.
    ///
    /// Records without an embedding are skipped; they cannot participate in
    /// similarity search and keeping them would only skew counts.
    async fn insert_sections(&self, records: Vec<SectionRecord>) -> Result<(), PipelineError>;

    /// Retrieve every record sharing the given dot-separated section number.
    async fn get_by_section_id(&self, section_id: &str)
    -> Result<Vec<SectionRecord>, PipelineError>;

    /// Return up to `top_k` records ranked by cosine similarity, best first.
    async fn search_similar(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<(SectionRecord, f32)>, PipelineError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, PipelineError>;

    /// Delete every record, returning how many were removed.
    async fn clear(&self) -> Result<usize, PipelineError>;
}
