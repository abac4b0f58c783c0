//! Pairs parsed sections with their embeddings for persistence.

use crate::stores::SectionRecord;
use crate::types::Section;

/// Collection of section records paired with embeddings, ready to insert.
#[derive(Debug, Clone)]
pub struct SectionBatch {
    records: Vec<SectionRecord>,
    skipped_sections: usize,
}

impl SectionBatch {
    /// Number of records that will be persisted.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of sections skipped because no embedding came back for them.
    pub fn skipped_sections(&self) -> usize {
        self.skipped_sections
    }

    /// Returns `true` when the batch holds nothing to persist.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only access to the prepared records.
    pub fn records(&self) -> &[SectionRecord] {
        &self.records
    }

    /// Consumes the batch and yields the underlying records.
    pub fn into_records(self) -> Vec<SectionRecord> {
        self.records
    }
}

/// Builds a [`SectionBatch`] by zipping sections with their embeddings.
///
/// Embeddings pair positionally with sections. Sections left without a
/// vector (a short embedding response) are counted as skipped rather than
/// stored unsearchable.
pub fn sections_to_batch(sections: &[Section], embeddings: Vec<Vec<f32>>) -> SectionBatch {
    let mut vectors = embeddings.into_iter();
    let mut records = Vec::with_capacity(sections.len());
    let mut skipped = 0usize;

    for section in sections {
        match vectors.next() {
            Some(embedding) => {
                records.push(SectionRecord::from_section(section).with_embedding(embedding));
            }
            None => skipped += 1,
        }
    }

    SectionBatch {
        records,
        skipped_sections: skipped,
    }
}
