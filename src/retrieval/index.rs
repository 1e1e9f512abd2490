//! In-memory vector index with exact cosine search

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

/// Search result with chunk and similarity
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity against the query (higher is better)
    pub similarity: f32,
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    norm: f32,
}

/// Similarity-searchable collection of embedded chunks.
///
/// Built once from a chunk batch, queried read-only thereafter. Each upload
/// gets its own index; the registry owns the long-lived ones.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed every chunk and build the index.
    ///
    /// Building is all-or-nothing: if the embedder fails for any chunk, the
    /// whole build fails and no partial index is returned.
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn EmbeddingProvider) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        let mut entries = Vec::with_capacity(chunks.len());
        for (mut chunk, vector) in chunks.into_iter().zip(vectors) {
            if vector.is_empty() {
                return Err(Error::Embedding(format!(
                    "Embedder returned an empty vector for chunk {}",
                    chunk.chunk_index
                )));
            }
            chunk.embedding = vector;
            entries.push(IndexEntry {
                norm: l2_norm(&chunk.embedding),
                chunk,
            });
        }

        Ok(Self { entries })
    }

    /// Search for the `top_k` chunks most similar to the query embedding
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        let query_norm = l2_norm(query_embedding);
        if query_norm == 0.0 {
            return Vec::new();
        }

        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(
                    query_embedding,
                    &entry.chunk.embedding,
                    query_norm,
                    entry.norm,
                ),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        results
    }

    /// Get chunk count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(a: &[f32], b: &[f32], a_norm: f32, b_norm: f32) -> f32 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (a_norm * b_norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Maps text onto a 2-d count vector: (count of 'a', count of 'b')
    struct CountEmbedder {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    impl CountEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(text: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: Some(text),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for CountEmbedder {
        async fn embed(&self, text: &str) -> crate::error::Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(text) {
                return Err(Error::Embedding("simulated failure".to_string()));
            }
            let a = text.chars().filter(|c| *c == 'a').count() as f32;
            let b = text.chars().filter(|c| *c == 'b').count() as f32;
            Ok(vec![a, b])
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "count"
        }
    }

    fn chunk(content: &str, label: &str, index: u32) -> Chunk {
        Chunk::new(content.to_string(), label.to_string(), Some(index + 1), index)
    }

    #[tokio::test]
    async fn search_ranks_by_cosine_similarity() {
        let embedder = CountEmbedder::new();
        let index = VectorIndex::build(
            vec![
                chunk("aaaa", "Page 1", 0),
                chunk("bbbb", "Page 2", 1),
                chunk("aabb", "Page 3", 2),
            ],
            &embedder,
        )
        .await
        .unwrap();

        let query = [4.0, 0.0]; // all-'a' direction
        let results = index.search(&query, 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.source_label, "Page 1");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[tokio::test]
    async fn build_is_all_or_nothing() {
        let embedder = CountEmbedder::failing_on("bbbb");
        let err = VectorIndex::build(
            vec![chunk("aaaa", "Page 1", 0), chunk("bbbb", "Page 2", 1)],
            &embedder,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn zero_query_returns_nothing() {
        let embedder = CountEmbedder::new();
        let index = VectorIndex::build(vec![chunk("aaaa", "Page 1", 0)], &embedder)
            .await
            .unwrap();

        assert!(index.search(&[0.0, 0.0], 5).is_empty());
    }
}
