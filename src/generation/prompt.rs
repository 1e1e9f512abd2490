//! Prompt templates for retrieval-augmented answering

use crate::retrieval::ScoredChunk;

/// Prompt builder for question-answering over retrieved chunks
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full QA prompt: retrieved extracts tagged with their source
    /// labels, followed by the question.
    ///
    /// The model is instructed to end its reply with a `SOURCES:` line
    /// listing the labels it used; the pipeline's response parsing depends
    /// on that convention.
    pub fn build_sources_prompt(question: &str, results: &[ScoredChunk]) -> String {
        format!(
            r#"Given the following extracts from a document and a question, create a final answer with references ("SOURCES").
If you don't know the answer, just say that you don't know. Don't try to make up an answer.
ALWAYS finish your answer with a line of the form "SOURCES: <label>, <label>" listing only the source labels of the extracts you actually used.

{context}QUESTION: {question}
FINAL ANSWER:"#,
            context = Self::build_context(results),
            question = question
        )
    }

    /// Render retrieved chunks as labeled extracts
    fn build_context(results: &[ScoredChunk]) -> String {
        let mut context = String::new();

        for result in results {
            context.push_str(&format!(
                "Content: {}\nSource: {}\n\n",
                result.chunk.content, result.chunk.source_label
            ));
        }

        context
    }
}
