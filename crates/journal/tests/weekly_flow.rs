use anyhow::Result;
use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

use mood_journal::compose::ENTRY_DELIMITER;
use mood_journal::{
    Classification, Classifier, EntryRecorder, EntryStore, ReportBuilder, Summarizer,
    SummarySection,
};

struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn analyze(&self, text: &str) -> Result<Classification> {
        let emotion = if text.contains("sunny") { "joy" } else { "sadness" };
        Ok(Classification {
            sentiment_label: "POSITIVE".to_string(),
            sentiment_score: 0.876,
            emotion_label: emotion.to_string(),
            emotion_score: 0.3333,
        })
    }
}

struct FirstWords;

impl Summarizer for FirstWords {
    fn summarize(&self, text: &str) -> Result<String> {
        Ok(text.split_whitespace().take(5).collect::<Vec<_>>().join(" "))
    }
}

#[test]
fn weekly_report_uses_only_entries_inside_the_window() {
    let dir = TempDir::new().unwrap();
    let store = EntryStore::new(dir.path().join("mood_log.csv"));
    let recorder = EntryRecorder::new(store.clone());

    let d7 = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
    recorder
        .record_on("stale memory from long ago", &KeywordClassifier, d7 - Duration::days(8))
        .unwrap();
    for offset in (0..7).rev() {
        let text = format!("day {offset} was sunny and bright outside");
        recorder
            .record_on(&text, &KeywordClassifier, d7 - Duration::days(offset))
            .unwrap();
    }
    recorder
        .record_on("edge of the window, gray", &KeywordClassifier, d7 - Duration::days(7))
        .unwrap();

    // Reload from disk as a fresh process would.
    let entries = EntryStore::new(store.path()).load_all().unwrap();
    assert_eq!(entries.len(), 9);
    assert!(entries.iter().all(|e| e.emotion_score == 0.33 && e.sentiment_score == 0.88));

    let report = ReportBuilder::new(&FirstWords).weekly(&entries, d7, 7);
    assert_eq!(report.entries.len(), 8);
    assert!(report.entries.iter().all(|e| e.date >= d7 - Duration::days(7) && e.date <= d7));

    assert!(!report.journal.contains("stale"));
    assert!(report.journal.contains("edge of the window, gray"));
    assert_eq!(report.journal.matches(ENTRY_DELIMITER).count(), 7);

    // 7 * 7 + 5 words: eligible for a summary.
    assert!(matches!(report.summary, SummarySection::Ready(_)));
    assert_eq!(report.top_words[0].1, 7);
    assert!(!report.top_words.iter().any(|(word, _)| word == "stale"));

    assert_eq!(report.emotion_counts.count(d7, "joy"), 1);
    assert_eq!(report.emotion_counts.count(d7 - Duration::days(7), "sadness"), 1);
    assert_eq!(report.emotion_counts.count(d7 - Duration::days(8), "sadness"), 0);
}

#[test]
fn rebuilding_the_report_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let recorder = EntryRecorder::new(EntryStore::new(dir.path().join("mood_log.csv")));
    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    recorder.record_on("sunny walk, sunny mood", &KeywordClassifier, day).unwrap();
    recorder.record_on("gray evening", &KeywordClassifier, day).unwrap();

    let entries = recorder.store().load_all().unwrap();
    let builder = ReportBuilder::new(&FirstWords);
    let first = builder.weekly(&entries, day, 7).journal;
    let second = builder.weekly(&entries, day, 7).journal;
    assert_eq!(first, second);
}
