//! Embedding providers behind a single async trait.
//!
//! Two implementations ship: a deterministic hash-based mock for tests and
//! offline runs, and an adapter over any [`rig`] embedding model for real
//! deployments. Stores and the query engine only ever see the trait.

use async_trait::async_trait;
use rig::embeddings::embedding::EmbeddingModel;

use crate::types::PipelineError;

/// Produces fixed-width embedding vectors for batches of text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Human-readable provider name, used in logs.
    fn name(&self) -> &str;

    /// Width of every vector this provider returns.
    fn dimensions(&self) -> usize;

    /// Embeds each text, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError>;
}

/// Deterministic provider that hashes text into small vectors.
///
/// Identical inputs always produce identical vectors, which makes similarity
/// ranking in tests reproducible without any network access.
#[derive(Debug, Default, Clone)]
pub struct MockEmbeddingProvider;

impl MockEmbeddingProvider {
    pub const DIMENSIONS: usize = 8;

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    fn name(&self) -> &str {
        "mock-hash"
    }

    fn dimensions(&self) -> usize {
        Self::DIMENSIONS
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        Ok(texts.iter().map(|text| hash_to_vec(text)).collect())
    }
}

fn hash_to_vec(text: &str) -> Vec<f32> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    let seed = hasher.finish();
    (0..MockEmbeddingProvider::DIMENSIONS)
        .map(|i| {
            let bits = seed.rotate_left((i * 8) as u32) ^ ((i as u64) << 24);
            (bits as f64 / u32::MAX as f64) as f32
        })
        .collect()
}

/// Adapter exposing any rig embedding model as an [`EmbeddingProvider`].
pub struct RigEmbeddingProvider<M> {
    model: M,
    label: String,
}

impl<M> RigEmbeddingProvider<M>
where
    M: EmbeddingModel + Send + Sync,
{
    pub fn new(model: M, label: impl Into<String>) -> Self {
        Self {
            model,
            label: label.into(),
        }
    }
}

#[async_trait]
impl<M> EmbeddingProvider for RigEmbeddingProvider<M>
where
    M: EmbeddingModel + Send + Sync,
{
    fn name(&self) -> &str {
        &self.label
    }

    fn dimensions(&self) -> usize {
        self.model.ndims()
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let embeddings = self
            .model
            .embed_texts(texts.iter().cloned())
            .await
            .map_err(|err| PipelineError::Embedding(err.to_string()))?;
        Ok(embeddings
            .into_iter()
            .map(|embedding| embedding.vec.into_iter().map(|v| v as f32).collect())
            .collect())
    }
}
