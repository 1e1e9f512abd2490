//! LLM client trait and backend selection

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{LlmBackend, LlmConfig};
use crate::error::Result;

use super::azure::AzureOpenAiClient;
use super::openai::OpenAiClient;
use super::strider::StriderClient;

/// Fixed system instruction sent with every completion request
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Trait for LLM-backed text generation
///
/// Implementations send `prompt` as a single user-turn message with fixed,
/// deployment-level sampling parameters. A non-success HTTP status surfaces
/// as `Error::Upstream`; the adapter never retries.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for the prompt, optionally bounded by stop
    /// sequences
    async fn generate(&self, prompt: &str, stop: Option<&[String]>) -> Result<String>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Construct the configured LLM backend
pub fn build_llm_client(config: &LlmConfig) -> Arc<dyn LlmClient> {
    match config.backend {
        LlmBackend::Azure => Arc::new(AzureOpenAiClient::new(config)),
        LlmBackend::OpenAi => Arc::new(OpenAiClient::new(config)),
        LlmBackend::Strider => Arc::new(StriderClient::new(config)),
    }
}
