//! docqa: document Q&A with retrieval-augmented answers and source citations
//!
//! Upload a PDF or spreadsheet and ask questions against it: the service
//! extracts text, splits it into overlapping chunks, embeds the chunks into
//! a similarity-searchable index, and answers by forwarding the top-ranked
//! chunks plus the question to a configured LLM backend. Cited sources are
//! normalized against the chunk labels that fed the prompt.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, PageContent, ParsedDocument, SupportedKind},
    response::{AnswerOutcome, AnswerResponse},
};
