//! Response types for the ask and reset endpoints

use serde::{Deserialize, Serialize};

/// Result of one answered question, before HTTP serialization
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    /// Generated answer text
    pub answer: String,
    /// Matched source labels, in the order the model cited them
    pub sources: Vec<String>,
    /// Number of cited tokens that matched no known label and were dropped
    pub dropped_sources: usize,
}

impl AnswerOutcome {
    /// Whether the answer carries at least one verifiable source
    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// JSON body returned by `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer
    pub answer: String,
    /// Comma-separated matched source labels, e.g. "Page 2, Page 3"
    pub sources: String,
    /// Count of cited sources that failed label matching (diagnostic,
    /// omitted when every citation matched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_sources: Option<usize>,
}

impl From<AnswerOutcome> for AnswerResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        let dropped = (outcome.dropped_sources > 0).then_some(outcome.dropped_sources);
        Self {
            answer: outcome.answer,
            sources: outcome.sources.join(", "),
            dropped_sources: dropped,
        }
    }
}

/// JSON body returned by `POST /api/reset`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Human-readable confirmation
    pub message: String,
}
