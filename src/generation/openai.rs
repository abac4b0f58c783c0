//! Completion adapter over a rig agent.

use async_trait::async_trait;
use rig::agent::Agent;
use rig::completion::{CompletionModel, Prompt};

use super::AnswerGenerator;
use crate::types::PipelineError;

/// Wraps any built rig agent as an [`AnswerGenerator`].
pub struct RigGenerator<M>
where
    M: CompletionModel,
{
    agent: Agent<M>,
    label: String,
}

impl<M> RigGenerator<M>
where
    M: CompletionModel,
{
    pub fn new(agent: Agent<M>, label: impl Into<String>) -> Self {
        Self {
            agent,
            label: label.into(),
        }
    }

    /// Model label used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl<M> AnswerGenerator for RigGenerator<M>
where
    M: CompletionModel + Send + Sync,
{
    async fn complete(&self, prompt: &str) -> Result<String, PipelineError> {
        tracing::debug!(model = %self.label, prompt_bytes = prompt.len(), "requesting completion");
        self.agent
            .prompt(prompt)
            .await
            .map_err(|err| PipelineError::Generation(err.to_string()))
    }
}
