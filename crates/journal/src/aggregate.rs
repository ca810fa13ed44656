use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::schema::Entry;

/// Occurrence counts keyed by `(date, emotion)`.
///
/// Only pairs that occur in the input are stored; [`MoodCountMatrix::rows`]
/// zero-fills for display.  Keys are ordered, so iteration is deterministic
/// regardless of the order entries were fed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodCountMatrix {
    counts: BTreeMap<(NaiveDate, String), usize>,
}

/// One display row of a zero-filled matrix: a date and one count per
/// emotion column, in [`MoodCountMatrix::emotions`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub date: NaiveDate,
    pub counts: Vec<usize>,
}

impl MoodCountMatrix {
    pub fn count(&self, date: NaiveDate, emotion: &str) -> usize {
        self.counts
            .get(&(date, emotion.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.counts.keys().map(|(date, _)| *date).collect();
        dates.into_iter().collect()
    }

    pub fn emotions(&self) -> Vec<String> {
        let emotions: BTreeSet<&str> = self
            .counts
            .keys()
            .map(|(_, emotion)| emotion.as_str())
            .collect();
        emotions.into_iter().map(ToString::to_string).collect()
    }

    pub fn totals_by_emotion(&self) -> BTreeMap<String, usize> {
        let mut totals = BTreeMap::new();
        for ((_, emotion), count) in &self.counts {
            *totals.entry(emotion.clone()).or_insert(0) += count;
        }
        totals
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str, usize)> {
        self.counts
            .iter()
            .map(|((date, emotion), count)| (*date, emotion.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Zero-filled rows for charting: one per date, one column per emotion.
    pub fn rows(&self) -> Vec<MatrixRow> {
        let emotions = self.emotions();
        self.dates()
            .into_iter()
            .map(|date| MatrixRow {
                date,
                counts: emotions
                    .iter()
                    .map(|emotion| self.count(date, emotion))
                    .collect(),
            })
            .collect()
    }
}

/// Count entries sharing each `(date, emotion)` pair.
pub fn counts_by_date_and_emotion(entries: &[Entry]) -> MoodCountMatrix {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts
            .entry((entry.date, entry.emotion.clone()))
            .or_insert(0) += 1;
    }
    MoodCountMatrix { counts }
}
