//! Shared types for documents, chunks, and responses

pub mod document;
pub mod response;

pub use document::{Chunk, PageContent, ParsedDocument, SupportedKind};
pub use response::{AnswerOutcome, AnswerResponse, ResetResponse};
