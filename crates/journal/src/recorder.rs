use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::capability::{Classifier, Transcriber};
use crate::error::{JournalError, JournalResult};
use crate::schema::Entry;
use crate::store::EntryStore;

/// Turns raw reflection text into a classified, persisted [`Entry`].
#[derive(Debug, Clone)]
pub struct EntryRecorder {
    store: EntryStore,
}

impl EntryRecorder {
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Record `raw_text` under today's local date.
    pub fn record(&self, raw_text: &str, classifier: &dyn Classifier) -> JournalResult<Entry> {
        self.record_on(raw_text, classifier, Local::now().date_naive())
    }

    /// Record `raw_text` under `date`.
    ///
    /// Exactly one row is appended on success.  Empty input and classifier
    /// failures return before the store is touched.
    pub fn record_on(
        &self,
        raw_text: &str,
        classifier: &dyn Classifier,
        date: NaiveDate,
    ) -> JournalResult<Entry> {
        if raw_text.trim().is_empty() {
            return Err(JournalError::Validation(
                "reflection text is empty; write or speak something about your day".to_string(),
            ));
        }

        let classification = classifier.analyze(raw_text).map_err(|err| {
            tracing::warn!(error = %err, chars = raw_text.chars().count(), "classifier failed");
            JournalError::Classification(format!("could not classify entry: {err:#}"))
        })?;

        let entry = Entry::from_classification(date, raw_text, &classification);
        self.store.append(&entry)?;

        tracing::info!(
            date = %entry.date,
            emotion = %entry.emotion,
            emotion_score = entry.emotion_score,
            sentiment = %entry.sentiment,
            sentiment_score = entry.sentiment_score,
            "mood entry recorded"
        );
        Ok(entry)
    }

    /// Transcribe `audio` and record the transcript under today's date.
    pub fn record_spoken(
        &self,
        audio: &Path,
        transcriber: &dyn Transcriber,
        classifier: &dyn Classifier,
    ) -> JournalResult<Entry> {
        let transcript = transcriber.transcribe(audio).map_err(|err| {
            JournalError::Transcription(format!("{}: {err:#}", audio.display()))
        })?;
        self.record(&transcript, classifier)
    }
}
