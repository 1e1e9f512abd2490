//! Answer generation: prompt assembly, LLM invocation, source linking

mod pipeline;
mod prompt;
mod sources;

pub use pipeline::AnswerPipeline;
pub use prompt::PromptBuilder;
pub use sources::{normalize_sources, split_answer_and_sources, NormalizedSources};
