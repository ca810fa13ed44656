use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded reflection, exactly as it is persisted in the mood log.
///
/// Field order matches the CSV column order:
/// `date,text,emotion,emotion_score,sentiment,sentiment_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub text: String,
    pub emotion: String,
    pub emotion_score: f64,
    pub sentiment: String,
    pub sentiment_score: f64,
}

impl Entry {
    /// Build an entry from a classifier result, rounding both scores.
    pub fn from_classification(date: NaiveDate, text: &str, classification: &Classification) -> Self {
        Self {
            date,
            text: text.to_string(),
            emotion: classification.emotion_label.clone(),
            emotion_score: round_score(classification.emotion_score),
            sentiment: classification.sentiment_label.clone(),
            sentiment_score: round_score(classification.sentiment_score),
        }
    }
}

/// Output of a [`crate::Classifier`] for a single text.
///
/// Labels are free-form strings from the model vocabulary; scores are
/// confidences that the core clamps to `[0, 1]` before storing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment_label: String,
    pub sentiment_score: f64,
    pub emotion_label: String,
    pub emotion_score: f64,
}

/// Clamp a confidence to `[0, 1]` and round it to two decimals.
pub fn round_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Truncate `s` to at most `max_chars` Unicode scalar values, returning a
/// sub-slice.
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_score_keeps_two_decimals() {
        assert_eq!(round_score(0.98765), 0.99);
        assert_eq!(round_score(0.5), 0.5);
        assert_eq!(round_score(0.004), 0.0);
    }

    #[test]
    fn round_score_clamps_out_of_range() {
        assert_eq!(round_score(1.7), 1.0);
        assert_eq!(round_score(-0.2), 0.0);
        assert_eq!(round_score(f64::NAN), 0.0);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_str("héllo", 2), "hé");
        assert_eq!(truncate_str("short", 100), "short");
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn from_classification_rounds_both_scores() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let classification = Classification {
            sentiment_label: "POSITIVE".to_string(),
            sentiment_score: 0.99871,
            emotion_label: "joy".to_string(),
            emotion_score: 0.7349,
        };
        let entry = Entry::from_classification(date, "a good day", &classification);
        assert_eq!(entry.text, "a good day");
        assert_eq!(entry.emotion, "joy");
        assert_eq!(entry.emotion_score, 0.73);
        assert_eq!(entry.sentiment, "POSITIVE");
        assert_eq!(entry.sentiment_score, 1.0);
    }
}
