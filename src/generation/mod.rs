//! Answer generation behind a single async trait.
//!
//! The query engine talks to [`AnswerGenerator`] only. [`RigGenerator`]
//! adapts a rig agent for real completions; [`ScriptedGenerator`] returns a
//! canned answer and records the prompt it saw, which keeps pipeline tests
//! deterministic and offline.

pub mod openai;
mod prompt;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::types::PipelineError;

pub use openai::RigGenerator;
pub use prompt::citation_prompt;

/// Produces an answer for a fully assembled prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Generator that always returns the same answer.
///
/// Captures the last prompt it received so tests can assert on prompt
/// construction without a live model.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    answer: String,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedGenerator {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            last_prompt: Mutex::new(None),
        }
    }

    /// The most recent prompt passed to [`AnswerGenerator::complete`].
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl AnswerGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, PipelineError> {
        *self.last_prompt.lock() = Some(prompt.to_string());
        Ok(self.answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_generator_replays_its_answer_and_records_the_prompt() {
        let generator = ScriptedGenerator::new("Theft is punished [1].");
        let answer = generator.complete("Question: what about theft?").await.unwrap();
        assert_eq!(answer, "Theft is punished [1].");
        assert_eq!(
            generator.last_prompt().as_deref(),
            Some("Question: what about theft?")
        );
    }
}
