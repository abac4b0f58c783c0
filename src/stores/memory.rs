//! In-memory section store for tests and offline runs.

use std::cmp::Ordering;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{SectionRecord, SectionStore};
use crate::types::PipelineError;

/// Stores records in a `Vec` behind an `RwLock`, ranking searches with the
/// same cosine measure the SQLite backend uses.
#[derive(Debug, Default)]
pub struct MemorySectionStore {
    records: RwLock<Vec<SectionRecord>>,
}

impl MemorySectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SectionStore for MemorySectionStore {
    async fn insert_sections(&self, records: Vec<SectionRecord>) -> Result<(), PipelineError> {
        let mut guard = self.records.write();
        guard.extend(records.into_iter().filter(|r| r.embedding.is_some()));
        Ok(())
    }

    async fn get_by_section_id(
        &self,
        section_id: &str,
    ) -> Result<Vec<SectionRecord>, PipelineError> {
        let guard = self.records.read();
        Ok(guard
            .iter()
            .filter(|r| r.section_id == section_id)
            .cloned()
            .collect())
    }

    async fn search_similar(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<(SectionRecord, f32)>, PipelineError> {
        let guard = self.records.read();
        let mut scored: Vec<(SectionRecord, f32)> = guard
            .iter()
            .filter_map(|record| {
                let embedding = record.embedding.as_ref()?;
                Some((record.clone(), cosine_similarity(query_embedding, embedding)))
            })
            .collect();
        // Stable sort keeps insertion order on equal scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize, PipelineError> {
        Ok(self.records.read().len())
    }

    async fn clear(&self) -> Result<usize, PipelineError> {
        let mut guard = self.records.write();
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
