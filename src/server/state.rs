//! Application state for the Q&A server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::generation::AnswerPipeline;
use crate::providers::{build_llm_client, EmbeddingProvider, LlmClient};
use crate::providers::ollama::OllamaEmbedder;
use crate::retrieval::IndexRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Session/index registry
    registry: Arc<IndexRegistry>,
    /// The answering pipeline
    pipeline: AnswerPipeline,
}

impl AppState {
    /// Create application state, selecting the embedding transport and LLM
    /// backend from configuration
    pub fn new(config: AppConfig) -> Self {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(&config.embedding));
        let llm = build_llm_client(&config.llm);

        tracing::info!(
            "Providers initialized (embedding: {}, llm: {})",
            embedder.name(),
            llm.name()
        );

        Self::with_providers(config, embedder, llm)
    }

    /// Create application state with explicit provider handles
    pub fn with_providers(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        let registry = Arc::new(IndexRegistry::new());
        let pipeline = AnswerPipeline::new(&config, embedder, llm, Arc::clone(&registry));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                registry,
                pipeline,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the session/index registry
    pub fn registry(&self) -> &Arc<IndexRegistry> {
        &self.inner.registry
    }

    /// Get the answering pipeline
    pub fn pipeline(&self) -> &AnswerPipeline {
        &self.inner.pipeline
    }
}
