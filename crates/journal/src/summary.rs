use crate::capability::Summarizer;
use crate::error::{JournalError, JournalResult};
use crate::schema::truncate_str;

/// Word count at or below which a window is not summarized.
pub const DEFAULT_MIN_WORDS: usize = 50;
pub const DAILY_MAX_CHARS: usize = 1024;
pub const WEEKLY_MAX_CHARS: usize = 2048;

/// Gate and input cap applied before calling the summarizer.
///
/// Text past `max_chars` characters is dropped before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryPolicy {
    pub min_words: usize,
    pub max_chars: usize,
}

impl SummaryPolicy {
    pub fn daily() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            max_chars: DAILY_MAX_CHARS,
        }
    }

    pub fn weekly() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            max_chars: WEEKLY_MAX_CHARS,
        }
    }
}

/// Result of a summary request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// Too little text; the summarizer was not called.
    NotEligible { words: usize },
}

/// Join `texts` with single spaces.
pub fn join_texts<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summarize the concatenation of `texts` under `policy`.
pub fn summarize<S: AsRef<str>>(
    texts: &[S],
    summarizer: &dyn Summarizer,
    policy: SummaryPolicy,
) -> JournalResult<SummaryOutcome> {
    let full_text = join_texts(texts);
    let words = full_text.split_whitespace().count();
    if words <= policy.min_words {
        tracing::debug!(words, min_words = policy.min_words, "not enough text to summarize");
        return Ok(SummaryOutcome::NotEligible { words });
    }

    let input = truncate_str(&full_text, policy.max_chars);
    tracing::debug!(words, input_chars = input.chars().count(), "calling summarizer");
    let summary = summarizer
        .summarize(input)
        .map_err(|err| JournalError::Summary(format!("summarizer rejected {words}-word text: {err:#}")))?;
    Ok(SummaryOutcome::Summary(summary))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::{Result, bail};

    use super::{SummaryOutcome, SummaryPolicy, summarize};
    use crate::capability::Summarizer;
    use crate::error::JournalError;

    #[derive(Default)]
    struct RecordingSummarizer {
        inputs: RefCell<Vec<String>>,
    }

    impl Summarizer for RecordingSummarizer {
        fn summarize(&self, text: &str) -> Result<String> {
            self.inputs.borrow_mut().push(text.to_string());
            Ok(" a short summary ".to_string())
        }
    }

    struct FailingSummarizer;

    impl Summarizer for FailingSummarizer {
        fn summarize(&self, _text: &str) -> Result<String> {
            bail!("summarizer offline")
        }
    }

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn fifty_words_are_not_eligible() {
        let summarizer = RecordingSummarizer::default();
        let outcome = summarize(&words(50), &summarizer, SummaryPolicy::daily()).unwrap();
        assert_eq!(outcome, SummaryOutcome::NotEligible { words: 50 });
        assert!(summarizer.inputs.borrow().is_empty(), "summarizer must not be called");
    }

    #[test]
    fn fifty_one_words_are_summarized() {
        let summarizer = RecordingSummarizer::default();
        let outcome = summarize(&words(51), &summarizer, SummaryPolicy::daily()).unwrap();
        assert_eq!(outcome, SummaryOutcome::Summary(" a short summary ".to_string()));
        let inputs = summarizer.inputs.borrow();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0], words(51).join(" "));
    }

    #[test]
    fn summarizer_text_is_returned_unchanged() {
        let summarizer = RecordingSummarizer::default();
        match summarize(&words(60), &summarizer, SummaryPolicy::weekly()).unwrap() {
            SummaryOutcome::Summary(text) => assert_eq!(text, " a short summary "),
            other => panic!("expected a summary, got {other:?}"),
        }
    }

    #[test]
    fn input_is_truncated_to_the_character_cap() {
        let summarizer = RecordingSummarizer::default();
        let texts = vec!["abcdefghij ".repeat(300)];
        let policy = SummaryPolicy::weekly();
        summarize(&texts, &summarizer, policy).unwrap();
        let inputs = summarizer.inputs.borrow();
        assert_eq!(inputs[0].chars().count(), policy.max_chars);
        assert!(texts[0].starts_with(inputs[0].as_str()));

        let daily = RecordingSummarizer::default();
        summarize(&texts, &daily, SummaryPolicy::daily()).unwrap();
        assert_eq!(daily.inputs.borrow()[0].chars().count(), 1024);
    }

    #[test]
    fn texts_are_joined_with_single_spaces() {
        let summarizer = RecordingSummarizer::default();
        let policy = SummaryPolicy {
            min_words: 2,
            max_chars: 100,
        };
        summarize(&["one two", "three"], &summarizer, policy).unwrap();
        assert_eq!(summarizer.inputs.borrow()[0], "one two three");
    }

    #[test]
    fn summarizer_failure_is_summary_error() {
        let err = summarize(&words(80), &FailingSummarizer, SummaryPolicy::weekly()).unwrap_err();
        assert!(matches!(err, JournalError::Summary(_)));
    }

    #[test]
    fn empty_window_is_not_eligible() {
        let texts: Vec<String> = Vec::new();
        let outcome = summarize(&texts, &FailingSummarizer, SummaryPolicy::daily()).unwrap();
        assert_eq!(outcome, SummaryOutcome::NotEligible { words: 0 });
    }
}
