//! Parsing and normalization of model-cited sources

/// Result of normalizing the model's raw sources string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSources {
    /// Tokens that matched a known label, in emission order.
    /// Duplicates are kept as emitted.
    pub matched: Vec<String>,
    /// Count of non-empty tokens that matched no known label
    pub dropped: usize,
}

/// Split a raw completion into answer text and the trailing comma-separated
/// sources string.
///
/// The model is instructed to finish with a `SOURCES:` line; without one the
/// whole completion is the answer and the sources string is empty. A leading
/// `FINAL ANSWER:` echo is stripped when present.
pub fn split_answer_and_sources(raw: &str) -> (String, String) {
    let (answer_part, sources_part) = match raw.rfind("SOURCES:") {
        Some(pos) => (&raw[..pos], &raw[pos + "SOURCES:".len()..]),
        None => (raw, ""),
    };

    let answer = answer_part
        .trim()
        .strip_prefix("FINAL ANSWER:")
        .unwrap_or(answer_part.trim())
        .trim()
        .to_string();

    (answer, sources_part.trim().to_string())
}

/// Normalize a raw sources string against the labels of the chunks that fed
/// the prompt.
///
/// Tokens are split on commas, trimmed of whitespace and trailing periods,
/// and matched exactly against the known labels. Unmatched tokens are
/// dropped silently from the result but counted for diagnostics. Emission
/// order is preserved; matches are not deduplicated.
pub fn normalize_sources(raw_sources: &str, known_labels: &[String]) -> NormalizedSources {
    let mut matched = Vec::new();
    let mut dropped = 0usize;

    for token in raw_sources.split(',') {
        let token = token.trim().trim_end_matches('.').trim();
        if token.is_empty() {
            continue;
        }

        if known_labels.iter().any(|label| label == token) {
            matched.push(token.to_string());
        } else {
            dropped += 1;
        }
    }

    NormalizedSources { matched, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_answer_and_trailing_sources() {
        let raw = "FINAL ANSWER: The policy allows remote work.\nSOURCES: Page 2, Page 3";
        let (answer, sources) = split_answer_and_sources(raw);
        assert_eq!(answer, "The policy allows remote work.");
        assert_eq!(sources, "Page 2, Page 3");
    }

    #[test]
    fn completion_without_sources_line_is_all_answer() {
        let (answer, sources) = split_answer_and_sources("I don't know.");
        assert_eq!(answer, "I don't know.");
        assert_eq!(sources, "");
    }

    #[test]
    fn normalization_is_exact_match_after_trimming() {
        // Trailing periods and padding are trimmed; "page4" misses on case
        // and format and is dropped.
        let result = normalize_sources(
            "Page 2, Page 3., page4",
            &labels(&["Page 2", "Page 3", "Page 5"]),
        );
        assert_eq!(result.matched, vec!["Page 2", "Page 3"]);
        assert_eq!(result.dropped, 1);
    }

    #[test]
    fn duplicates_are_kept_in_emission_order() {
        let result = normalize_sources("Page 3, Page 2, Page 3", &labels(&["Page 2", "Page 3"]));
        assert_eq!(result.matched, vec!["Page 3", "Page 2", "Page 3"]);
        assert_eq!(result.dropped, 0);
    }

    #[test]
    fn empty_tokens_are_ignored_not_dropped() {
        let result = normalize_sources("Page 2, , ", &labels(&["Page 2"]));
        assert_eq!(result.matched, vec!["Page 2"]);
        assert_eq!(result.dropped, 0);
    }

    #[test]
    fn nothing_matches_yields_empty_with_count() {
        let result = normalize_sources("Appendix A, Intro", &labels(&["Page 1"]));
        assert!(result.matched.is_empty());
        assert_eq!(result.dropped, 2);
    }
}
