//! Provider abstractions for embeddings and LLM backends
//!
//! Trait-based seams so the concrete embedding transport and LLM endpoint
//! are selected by configuration at process start, not by code duplication.

pub mod azure;
pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod openai;
pub mod strider;

pub use embedding::EmbeddingProvider;
pub use llm::{build_llm_client, LlmClient};
