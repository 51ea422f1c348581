//! Reasoning-service provider trait

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for reasoning-service providers
///
/// Implementations give access to a hosted chat-completion model. The
/// committee only depends on this trait, so tests can substitute a scripted
/// provider.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from the model
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with messages, tools, and parameters
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}
