//! Offline keyword classifier.
//!
//! This is a rough signal meant for running without a model server: a
//! valence score from positive/negative keywords (with a short negation
//! lookback) decides the sentiment, and per-emotion keyword hits decide the
//! emotion.

use anyhow::Result;

use crate::capability::Classifier;
use crate::schema::Classification;

const POSITIVE_WORDS: &[&str] = &[
    "great", "love", "excited", "happy", "amazing", "success", "excellent",
    "wonderful", "fantastic", "glad", "pleased", "proud", "brilliant",
    "perfect", "achieved", "helpful", "thanks", "grateful", "awesome",
    "enjoy", "enjoyed", "like", "good", "nice", "calm", "relaxed", "fun",
];

const NEGATIVE_WORDS: &[&str] = &[
    "frustrated", "confused", "failed", "worried", "stuck", "broken",
    "terrible", "awful", "wrong", "bad", "hate", "annoying", "difficult",
    "struggle", "problem", "sad", "angry", "tired", "lonely", "anxious",
    "scared", "upset", "cried", "loss", "lost", "miss", "stressed",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "without"];

/// Emotion vocabulary, in tie-break order.
const EMOTION_LEXICON: &[(&str, &[&str])] = &[
    ("joy", &["happy", "joy", "glad", "love", "great", "fun", "excited", "proud", "grateful", "enjoyed", "wonderful", "amazing"]),
    ("sadness", &["sad", "down", "lonely", "cried", "miss", "lost", "loss", "grief", "unhappy", "depressed", "empty"]),
    ("anger", &["angry", "mad", "furious", "annoyed", "annoying", "hate", "irritated", "frustrated", "rage"]),
    ("fear", &["afraid", "scared", "anxious", "worried", "nervous", "panic", "terrified", "stressed", "dread"]),
    ("surprise", &["surprised", "unexpected", "suddenly", "shocked", "amazed", "wow", "astonished"]),
    ("disgust", &["disgusted", "gross", "disgusting", "revolting", "sick"]),
];

/// Confidence reported when no emotion keyword matched.
const NEUTRAL_SCORE: f64 = 0.5;

fn words_of(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Keyword valence clamped to `[-1.0, 1.0]`.
///
/// A negation token within the two preceding words flips a keyword's
/// contribution, so "not bad" leans positive.
pub fn infer_valence(text: &str) -> f64 {
    let words = words_of(text);
    let mut score: f64 = 0.0;
    for (i, word) in words.iter().enumerate() {
        let negated = (i > 0 && NEGATIONS.contains(&words[i - 1].as_str()))
            || (i > 1 && NEGATIONS.contains(&words[i - 2].as_str()));

        if POSITIVE_WORDS.contains(&word.as_str()) {
            score += if negated { -0.10 } else { 0.15 };
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            score += if negated { 0.10 } else { -0.15 };
        }
    }

    let exclamations = text.chars().filter(|&c| c == '!').count() as f64;
    if score > 0.0 {
        score += (exclamations * 0.05).min(0.20);
    }

    score.clamp(-1.0, 1.0)
}

/// Dominant emotion and the share of emotion keywords it received.
pub fn infer_emotion(text: &str) -> (String, f64) {
    let words = words_of(text);
    let mut best: Option<(&str, usize)> = None;
    let mut total = 0usize;

    for (emotion, keywords) in EMOTION_LEXICON {
        let hits = words
            .iter()
            .filter(|w| keywords.contains(&w.as_str()))
            .count();
        total += hits;
        if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
            best = Some((*emotion, hits));
        }
    }

    match best {
        Some((emotion, hits)) => (emotion.to_string(), hits as f64 / total as f64),
        None => ("neutral".to_string(), NEUTRAL_SCORE),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl Classifier for LexiconClassifier {
    fn analyze(&self, text: &str) -> Result<Classification> {
        let valence = infer_valence(text);
        let (emotion_label, emotion_score) = infer_emotion(text);
        let sentiment_label = if valence < 0.0 { "NEGATIVE" } else { "POSITIVE" };
        Ok(Classification {
            sentiment_label: sentiment_label.to_string(),
            sentiment_score: 0.5 + valence.abs() / 2.0,
            emotion_label,
            emotion_score,
        })
    }
}
