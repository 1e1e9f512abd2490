//! Text chunking into overlapping windows with citation labels

use crate::config::SourceLabelPolicy;
use crate::error::{Error, Result};
use crate::types::{Chunk, ParsedDocument};

/// Text chunker with configurable window size, overlap, and label policy
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
    /// How chunks are labeled for citation matching
    policy: SourceLabelPolicy,
}

impl TextChunker {
    /// Create a new chunker. The overlap is clamped below the chunk size;
    /// windows must always advance.
    pub fn new(chunk_size: usize, overlap: usize, policy: SourceLabelPolicy) -> Self {
        let chunk_size = chunk_size.max(1);
        let overlap = if overlap >= chunk_size {
            chunk_size / 4
        } else {
            overlap
        };

        Self {
            chunk_size,
            overlap,
            policy,
        }
    }

    /// Split a parsed document into chunks, preserving document and
    /// intra-page order.
    ///
    /// Window text is kept verbatim: concatenating consecutive chunks from
    /// the same page reconstructs the page modulo the overlapping region
    /// duplicated once.
    pub fn split(&self, parsed: &ParsedDocument) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        let mut ordinal = 0u32;

        for page in &parsed.pages {
            let chars: Vec<char> = page.content.chars().collect();
            if chars.is_empty() {
                continue;
            }

            let mut start = 0usize;
            loop {
                let end = (start + self.chunk_size).min(chars.len());
                let content: String = chars[start..end].iter().collect();

                let label = self.label_for(page.page_number, ordinal);
                chunks.push(Chunk::new(content, label, page.page_number, ordinal));
                ordinal += 1;

                if end == chars.len() {
                    break;
                }
                start = end - self.overlap;
            }
        }

        if chunks.is_empty() {
            return Err(Error::EmptyDocument(
                "Document contained no extractable text to chunk".to_string(),
            ));
        }

        Ok(chunks)
    }

    /// Derive the citation label for a chunk
    fn label_for(&self, page_number: Option<u32>, ordinal: u32) -> String {
        match self.policy {
            SourceLabelPolicy::PageNumber => {
                format!("Page {}", page_number.unwrap_or(ordinal + 1))
            }
            SourceLabelPolicy::ChunkOrdinal => format!("source_{}", ordinal),
        }
    }
}
