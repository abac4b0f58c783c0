//! Query engine: embed the question, retrieve sections, generate a cited
//! answer, and assemble the response payload.

use std::sync::Arc;

use crate::citations::assemble_output;
use crate::embeddings::EmbeddingProvider;
use crate::generation::{AnswerGenerator, citation_prompt};
use crate::stores::SectionStore;
use crate::types::{Output, PipelineError, RetrievedSection};

/// Retrieval depth used when the caller does not override it.
pub const DEFAULT_TOP_K: usize = 2;

/// Answers questions against a store of embedded sections.
///
/// All three collaborators sit behind trait objects, so the same engine runs
/// against SQLite with live models or fully in memory under test.
pub struct QueryEngine {
    store: Arc<dyn SectionStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn AnswerGenerator>,
    default_top_k: usize,
}

impl QueryEngine {
    pub fn new(
        store: Arc<dyn SectionStore>,
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            store,
            embeddings,
            generator,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the retrieval depth used by [`QueryEngine::answer`].
    #[must_use]
    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Answers `query` at the engine's default retrieval depth.
    pub async fn answer(&self, query: &str) -> Result<Output, PipelineError> {
        self.answer_with_top_k(query, self.default_top_k).await
    }

    /// Answers `query`, retrieving up to `top_k` sections for grounding.
    ///
    /// An empty store is not an error: the generator still runs, with no
    /// sources in the prompt and no citations in the output.
    pub async fn answer_with_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Output, PipelineError> {
        let vectors = self.embeddings.embed_batch(&[query.to_string()]).await?;
        let query_embedding = vectors.into_iter().next().ok_or_else(|| {
            PipelineError::Embedding("provider returned no embedding for the query".to_string())
        })?;

        let hits = self.store.search_similar(&query_embedding, top_k).await?;
        let retrieved: Vec<RetrievedSection> = hits
            .into_iter()
            .map(|(record, similarity)| RetrievedSection {
                section_id: Some(record.section_id),
                page: record.page,
                text: record.content,
                score: Some(similarity),
            })
            .collect();
        tracing::debug!(top_k, hits = retrieved.len(), "retrieved sections for query");

        let prompt = citation_prompt(query, &retrieved);
        let answer = self.generator.complete(&prompt).await?;
        tracing::info!(
            query_chars = query.chars().count(),
            hits = retrieved.len(),
            answer_chars = answer.chars().count(),
            "query answered"
        );

        Ok(assemble_output(query, &answer, &retrieved))
    }

    /// Number of sections currently stored.
    pub async fn section_count(&self) -> Result<usize, PipelineError> {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::MockEmbeddingProvider;
    use crate::generation::ScriptedGenerator;
    use crate::stores::{MemorySectionStore, SectionRecord};

    async fn seeded_engine(answer: &str) -> QueryEngine {
        let store = Arc::new(MemorySectionStore::new());
        let embeddings = Arc::new(MockEmbeddingProvider::new());
        let vectors = embeddings
            .embed_batch(&["Stealing is punished by fines.".to_string()])
            .await
            .unwrap();
        store
            .insert_sections(vec![
                SectionRecord::new("r1", "2.1", "Theft", "Stealing is punished by fines.")
                    .with_embedding(vectors[0].clone()),
            ])
            .await
            .unwrap();
        QueryEngine::new(store, embeddings, Arc::new(ScriptedGenerator::new(answer)))
    }

    #[tokio::test]
    async fn answer_carries_citations_from_retrieval() {
        let engine = seeded_engine("Fines apply [1].").await;
        let output = engine.answer("what happens to thieves?").await.unwrap();
        assert_eq!(output.response, "Fines apply [1].");
        assert_eq!(output.citations.len(), 1);
        assert_eq!(output.citations[0].source, "Section 2.1");
        assert!(output.response_segments.iter().any(|s| s.is_citation()));
    }

    #[tokio::test]
    async fn empty_store_still_produces_an_answer() {
        let store = Arc::new(MemorySectionStore::new());
        let engine = QueryEngine::new(
            store,
            Arc::new(MockEmbeddingProvider::new()),
            Arc::new(ScriptedGenerator::new("No sources available.")),
        );
        let output = engine.answer("anything?").await.unwrap();
        assert_eq!(output.response, "No sources available.");
        assert!(output.citations.is_empty());
    }
}
