use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docqa::error::{Error, Result};
use docqa::providers::EmbeddingProvider;
use docqa::retrieval::{IndexRegistry, VectorIndex};
use docqa::types::Chunk;

/// Maps text onto a 2-d count vector: (count of 'a', count of 'b')
struct CountEmbedder;

#[async_trait]
impl EmbeddingProvider for CountEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
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

async fn build_test_index() -> Result<VectorIndex> {
    let chunks = vec![
        Chunk::new("aaaa".to_string(), "Page 1".to_string(), Some(1), 0),
        Chunk::new("bbbb".to_string(), "Page 2".to_string(), Some(2), 1),
    ];
    VectorIndex::build(chunks, &CountEmbedder).await
}

#[tokio::test]
async fn second_question_reuses_the_registered_index() {
    let registry = IndexRegistry::new();
    let builds = AtomicUsize::new(0);

    let first = registry
        .get_or_build("upload-1", || async {
            builds.fetch_add(1, Ordering::SeqCst);
            build_test_index().await
        })
        .await
        .unwrap();

    let second = registry
        .get_or_build("upload-1", || async {
            builds.fetch_add(1, Ordering::SeqCst);
            build_test_index().await
        })
        .await
        .unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn put_then_get_returns_the_same_index() {
    let registry = IndexRegistry::new();
    assert!(registry.get("upload-1").await.is_none());

    let index = Arc::new(build_test_index().await.unwrap());
    registry.put("upload-1", Arc::clone(&index)).await;

    let fetched = registry.get("upload-1").await.unwrap();
    assert!(Arc::ptr_eq(&index, &fetched));
}

#[tokio::test]
async fn different_upload_ids_get_independent_indexes() {
    let registry = IndexRegistry::new();

    let a = registry
        .get_or_build("upload-a", || build_test_index())
        .await
        .unwrap();
    let b = registry
        .get_or_build("upload-b", || build_test_index())
        .await
        .unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 2);
}

#[tokio::test]
async fn concurrent_first_questions_build_exactly_once() {
    let registry = Arc::new(IndexRegistry::new());
    let builds = Arc::new(AtomicUsize::new(0));

    let make_task = |registry: Arc<IndexRegistry>, builds: Arc<AtomicUsize>| async move {
        registry
            .get_or_build("upload-racy", || async {
                builds.fetch_add(1, Ordering::SeqCst);
                // Widen the race window so both tasks observe "absent"
                // before either build completes.
                tokio::time::sleep(Duration::from_millis(50)).await;
                build_test_index().await
            })
            .await
    };

    let (first, second) = tokio::join!(
        make_task(Arc::clone(&registry), Arc::clone(&builds)),
        make_task(Arc::clone(&registry), Arc::clone(&builds)),
    );

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
}

#[tokio::test]
async fn failed_build_is_not_cached() {
    let registry = IndexRegistry::new();
    let builds = AtomicUsize::new(0);

    let err = registry
        .get_or_build("upload-flaky", || async {
            builds.fetch_add(1, Ordering::SeqCst);
            Err::<VectorIndex, _>(Error::Embedding("embedder offline".to_string()))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
    assert!(registry.get("upload-flaky").await.is_none());

    // The next request retries the full build and succeeds.
    registry
        .get_or_build("upload-flaky", || async {
            builds.fetch_add(1, Ordering::SeqCst);
            build_test_index().await
        })
        .await
        .unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn reset_clears_every_entry_and_forces_rebuild() {
    let registry = IndexRegistry::new();
    let builds = AtomicUsize::new(0);

    for id in ["upload-1", "upload-2"] {
        registry
            .get_or_build(id, || async {
                builds.fetch_add(1, Ordering::SeqCst);
                build_test_index().await
            })
            .await
            .unwrap();
    }
    assert_eq!(registry.len(), 2);

    let cleared = registry.clear_all().await;
    assert_eq!(cleared, 2);
    assert!(registry.is_empty());
    assert!(registry.get("upload-1").await.is_none());
    assert!(registry.get("upload-2").await.is_none());

    // A question after the reset triggers a full rebuild.
    registry
        .get_or_build("upload-1", || async {
            builds.fetch_add(1, Ordering::SeqCst);
            build_test_index().await
        })
        .await
        .unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 3);
}
