//! The answering pipeline: resolve an index, retrieve, generate, cite

use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::ingestion::IngestPipeline;
use crate::providers::{EmbeddingProvider, LlmClient};
use crate::retrieval::{IndexRegistry, VectorIndex};
use crate::types::AnswerOutcome;

use super::prompt::PromptBuilder;
use super::sources::{normalize_sources, split_answer_and_sources};

/// Retrieval-augmented answering over uploaded documents.
///
/// Owns the ingest pipeline and provider handles; the registry decides
/// whether a question reuses an existing index or triggers a fresh
/// parse-chunk-embed build.
pub struct AnswerPipeline {
    ingest: IngestPipeline,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmClient>,
    registry: Arc<IndexRegistry>,
    top_k: usize,
}

impl AnswerPipeline {
    /// Create a pipeline from configuration and provider handles
    pub fn new(
        config: &AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
        registry: Arc<IndexRegistry>,
    ) -> Self {
        Self {
            ingest: IngestPipeline::new(&config.chunking),
            embedder,
            llm,
            registry,
            top_k: config.retrieval.top_k,
        }
    }

    /// Get the registry handle
    pub fn registry(&self) -> &Arc<IndexRegistry> {
        &self.registry
    }

    /// Parse, chunk, and embed one upload into a fresh index
    pub async fn build_index(&self, path: &Path, declared_mime: &str) -> Result<VectorIndex> {
        let chunks = self.ingest.ingest(path, declared_mime)?;
        VectorIndex::build(chunks, self.embedder.as_ref()).await
    }

    /// Answer a question against an upload.
    ///
    /// With an `upload_id`, the registry's index for that identifier is
    /// reused when present and built-and-registered otherwise. Without one,
    /// a request-local index is built and discarded afterwards.
    pub async fn answer_upload(
        &self,
        upload_id: Option<&str>,
        question: &str,
        path: &Path,
        declared_mime: &str,
    ) -> Result<AnswerOutcome> {
        let index = match upload_id {
            Some(id) => {
                self.registry
                    .get_or_build(id, || self.build_index(path, declared_mime))
                    .await?
            }
            None => Arc::new(self.build_index(path, declared_mime).await?),
        };

        self.answer_with_index(&index, question).await
    }

    /// Answer a question against an already-built index
    pub async fn answer_with_index(
        &self,
        index: &VectorIndex,
        question: &str,
    ) -> Result<AnswerOutcome> {
        let query_embedding = self.embedder.embed(question).await?;
        let hits = index.search(&query_embedding, self.top_k);

        let prompt = PromptBuilder::build_sources_prompt(question, &hits);
        let raw = self.llm.generate(&prompt, None).await?;

        let (answer, raw_sources) = split_answer_and_sources(&raw);

        // Citation matching runs against the labels of exactly the chunks
        // that fed the prompt.
        let known_labels: Vec<String> =
            hits.iter().map(|h| h.chunk.source_label.clone()).collect();
        let normalized = normalize_sources(&raw_sources, &known_labels);

        if normalized.dropped > 0 {
            tracing::debug!(
                "Dropped {} cited source(s) with no matching label",
                normalized.dropped
            );
        }
        if !raw_sources.is_empty() && normalized.matched.is_empty() {
            tracing::info!("Answer has no verifiable sources");
        }

        Ok(AnswerOutcome {
            answer,
            sources: normalized.matched,
            dropped_sources: normalized.dropped,
        })
    }
}
