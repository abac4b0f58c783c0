//! Ingestion pipeline: document text in, searchable section records out.
//!
//! The helpers in this module provide three core capabilities:
//!
//! * [`pages`] — splitting extracted text into numbered pages.
//! * [`batch`] — pairing parsed sections with their embeddings.
//! * [`ingest_document`] — the end-to-end paginate / parse / embed / store
//!   pass used at startup and on rebuilds.

pub mod batch;
pub mod pages;

use crate::embeddings::EmbeddingProvider;
use crate::sections::parse;
use crate::stores::SectionStore;
use crate::types::PipelineError;

pub use batch::{SectionBatch, sections_to_batch};
pub use pages::paginate;

/// Largest embedding request sent in one call.
const EMBED_BATCH: usize = 64;

/// Summary of a completed ingestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Pages found in the document.
    pub pages: usize,
    /// Sections the parser produced.
    pub sections: usize,
    /// Records persisted with embeddings.
    pub stored: usize,
    /// Sections dropped because no embedding came back.
    pub skipped: usize,
}

/// Parses `text` into sections, embeds their bodies, and stores the result.
///
/// Embedding requests go out in fixed-size batches so providers with request
/// caps still work on large documents. The outcome reports what was kept and
/// what was dropped; an empty document is a valid no-op.
pub async fn ingest_document(
    store: &dyn SectionStore,
    embeddings: &dyn EmbeddingProvider,
    text: &str,
) -> Result<IngestOutcome, PipelineError> {
    let pages = paginate(text);
    let sections = parse(&pages);

    let bodies: Vec<String> = sections.iter().map(|s| s.body.clone()).collect();
    let mut vectors = Vec::with_capacity(bodies.len());
    for chunk in bodies.chunks(EMBED_BATCH) {
        vectors.extend(embeddings.embed_batch(chunk).await?);
    }

    let batch = sections_to_batch(&sections, vectors);
    let outcome = IngestOutcome {
        pages: pages.len(),
        sections: sections.len(),
        stored: batch.record_count(),
        skipped: batch.skipped_sections(),
    };
    store.insert_sections(batch.into_records()).await?;

    tracing::info!(
        pages = outcome.pages,
        sections = outcome.sections,
        stored = outcome.stored,
        skipped = outcome.skipped,
        provider = embeddings.name(),
        "document ingested"
    );
    Ok(outcome)
}
