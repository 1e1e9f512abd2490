//! Ingestion pipeline orchestration

use std::path::Path;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, ParsedDocument};

use super::chunker::TextChunker;
use super::parser::FileParser;

/// Parse-and-chunk pipeline for one upload
pub struct IngestPipeline {
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a pipeline from the chunking configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            chunker: TextChunker::new(config.chunk_size, config.chunk_overlap, config.label_policy),
        }
    }

    /// Load a file into page/sheet segments
    pub fn parse_file(&self, path: &Path, declared_mime: &str) -> Result<ParsedDocument> {
        FileParser::load(path, declared_mime)
    }

    /// Chunk a parsed document
    pub fn create_chunks(&self, parsed: &ParsedDocument) -> Result<Vec<Chunk>> {
        self.chunker.split(parsed)
    }

    /// Full ingestion: parse + chunk
    pub fn ingest(&self, path: &Path, declared_mime: &str) -> Result<Vec<Chunk>> {
        let parsed = self.parse_file(path, declared_mime)?;
        self.create_chunks(&parsed)
    }
}
