//! Q&A server binary
//!
//! Run with: cargo run --bin docqa-server

use docqa::{config::AppConfig, server::QaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (DOCQA_CONFIG names a TOML file, else defaults)
    let config = AppConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM backend: {:?}", config.llm.backend);
    tracing::info!("  - Embedding model: {}", config.embedding.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Chunk overlap: {}", config.chunking.chunk_overlap);
    tracing::info!("  - Label policy: {:?}", config.chunking.label_policy);
    tracing::info!("  - Top-k: {}", config.retrieval.top_k);

    let server = QaServer::new(config);

    println!("Document Q&A server starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/ask   - Upload a document and ask a question");
    println!("  POST /api/reset - Clear all indexed uploads");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
