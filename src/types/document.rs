//! Document and chunk types with source tracking for citations

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// MIME type for PDF uploads
pub const MIME_PDF: &str = "application/pdf";
/// MIME type for Excel spreadsheet uploads
pub const MIME_SPREADSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Supported upload kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupportedKind {
    /// PDF document
    Pdf,
    /// Excel spreadsheet (.xlsx)
    Spreadsheet,
}

impl SupportedKind {
    /// Resolve a declared MIME type to a supported kind.
    ///
    /// Exactly two MIME types are accepted; everything else is rejected
    /// before any parsing is attempted.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            MIME_PDF => Some(Self::Pdf),
            MIME_SPREADSHEET => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Spreadsheet => "Excel Spreadsheet (.xlsx)",
        }
    }
}

/// Text extracted from a single page or sheet
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page or sheet index (1-based), when the parser can attribute one
    pub page_number: Option<u32>,
    /// Text content of the page
    pub content: String,
}

/// A parsed upload: the ordered page/sheet segments of one document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Upload kind
    pub kind: SupportedKind,
    /// Per-page (or per-sheet) content, in document order
    pub pages: Vec<PageContent>,
}

impl ParsedDocument {
    /// Total number of pages or sheets
    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }
}

/// A chunk of text from a document, the unit indexed and retrieved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Citation label; must resolve back to exactly this chunk's text
    pub source_label: String,
    /// Page or sheet index the chunk came from (1-based)
    pub page_number: Option<u32>,
    /// Chunk ordinal across the whole document (0-based)
    pub chunk_index: u32,
    /// Embedding vector, filled in by the indexer
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(
        content: String,
        source_label: String,
        page_number: Option<u32>,
        chunk_index: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            source_label,
            page_number,
            chunk_index,
            embedding: Vec::new(),
        }
    }
}
