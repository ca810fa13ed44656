use anyhow::{Result, bail};

use crate::capability::Summarizer;

/// Offline summarizer that keeps the leading sentences of the text.
#[derive(Debug, Clone, Copy)]
pub struct LeadSummarizer {
    pub max_sentences: usize,
    /// Used when the text has no sentence punctuation at all.
    pub max_words: usize,
}

impl Default for LeadSummarizer {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            max_words: 40,
        }
    }
}

/// Split on `.`, `!` and `?`, keeping the terminator with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if sentence.chars().any(char::is_alphanumeric) {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if tail.chars().any(char::is_alphanumeric) {
        sentences.push(tail);
    }
    sentences
}

impl Summarizer for LeadSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            bail!("nothing to summarize");
        }

        if sentences.len() == 1 {
            let words: Vec<&str> = text.split_whitespace().take(self.max_words).collect();
            return Ok(words.join(" "));
        }

        Ok(sentences
            .into_iter()
            .take(self.max_sentences.max(1))
            .collect::<Vec<_>>()
            .join(" "))
    }
}
