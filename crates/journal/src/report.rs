//! Daily and weekly report assembly.
//!
//! Each section is computed on its own: a failed summary leaves the word
//! table, the emotion matrix and the journal intact.

use chrono::NaiveDate;

use crate::aggregate::{MoodCountMatrix, counts_by_date_and_emotion};
use crate::capability::Summarizer;
use crate::compose::compose;
use crate::schema::Entry;
use crate::summary::{SummaryOutcome, SummaryPolicy, join_texts, summarize};
use crate::window::{today, trailing_window, window_start};
use crate::words::top_words;

/// State of the summary section of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySection {
    /// The window holds no entries.
    NoEntries,
    /// Too little text to summarize; the summarizer was not called.
    NotEligible { words: usize },
    Ready(String),
    /// The summarizer failed; the message is fit for display.
    Failed(String),
}

impl SummarySection {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    fn from_window(texts: &[String], summarizer: &dyn Summarizer, policy: SummaryPolicy) -> Self {
        if texts.is_empty() {
            return Self::NoEntries;
        }
        match summarize(texts, summarizer, policy) {
            Ok(SummaryOutcome::Summary(text)) => Self::Ready(text),
            Ok(SummaryOutcome::NotEligible { words }) => Self::NotEligible { words },
            Err(err) => {
                tracing::warn!(error = %err, "summary section failed; continuing without it");
                Self::Failed(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
    pub summary: SummarySection,
}

#[derive(Debug, Clone)]
pub struct WeeklyReport {
    pub reference: NaiveDate,
    pub days: i64,
    pub entries: Vec<Entry>,
    pub summary: SummarySection,
    pub top_words: Vec<(String, usize)>,
    pub emotion_counts: MoodCountMatrix,
    pub journal: String,
}

impl WeeklyReport {
    /// First date covered by the window.
    pub fn start(&self) -> NaiveDate {
        window_start(self.reference, self.days)
    }
}

/// Builds reports from a loaded entry log.
pub struct ReportBuilder<'a> {
    summarizer: &'a dyn Summarizer,
    daily_policy: SummaryPolicy,
    weekly_policy: SummaryPolicy,
    top_n: usize,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(summarizer: &'a dyn Summarizer) -> Self {
        Self {
            summarizer,
            daily_policy: SummaryPolicy::daily(),
            weekly_policy: SummaryPolicy::weekly(),
            top_n: crate::words::DEFAULT_TOP_WORDS,
        }
    }

    pub fn with_policies(mut self, daily: SummaryPolicy, weekly: SummaryPolicy) -> Self {
        self.daily_policy = daily;
        self.weekly_policy = weekly;
        self
    }

    pub fn with_top_words(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn daily(&self, entries: &[Entry], date: NaiveDate) -> DailyReport {
        let entries = today(entries, date);
        let texts: Vec<String> = entries.iter().map(|e| e.text.clone()).collect();
        let summary = SummarySection::from_window(&texts, self.summarizer, self.daily_policy);
        DailyReport {
            date,
            entries,
            summary,
        }
    }

    pub fn weekly(&self, entries: &[Entry], reference: NaiveDate, days: i64) -> WeeklyReport {
        let entries = trailing_window(entries, reference, days);
        let texts: Vec<String> = entries.iter().map(|e| e.text.clone()).collect();

        let summary = SummarySection::from_window(&texts, self.summarizer, self.weekly_policy);
        let top_words = top_words(&join_texts(&texts), self.top_n);
        let emotion_counts = counts_by_date_and_emotion(&entries);
        let journal = compose(summary.text(), &top_words, &texts);

        tracing::debug!(
            %reference,
            days,
            entries = entries.len(),
            words = top_words.len(),
            "weekly report built"
        );

        WeeklyReport {
            reference,
            days,
            entries,
            summary,
            top_words,
            emotion_counts,
            journal,
        }
    }
}
