use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{JournalError, JournalResult};
use crate::schema::Entry;

/// Column header written at the top of every mood log.
pub const COLUMNS: [&str; 6] = [
    "date",
    "text",
    "emotion",
    "emotion_score",
    "sentiment",
    "sentiment_score",
];

/// Append-only CSV log of mood entries.
///
/// The store never rewrites or deletes a row: `append` opens the file in
/// append mode and `load_all` only reads.  One reader/writer per file is
/// assumed; there is no locking.
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `entry` after the existing rows, creating the file (with a
    /// header) and its parent directories on first write.
    pub fn append(&self, entry: &Entry) -> JournalResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| JournalError::persistence("create directory for", &self.path, err))?;
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| JournalError::persistence("open", &self.path, err))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer
                .write_record(COLUMNS)
                .map_err(|err| JournalError::persistence("write header to", &self.path, err))?;
        }
        writer
            .serialize(entry)
            .map_err(|err| JournalError::persistence("append to", &self.path, err))?;

        // Flush and fsync before reporting success.
        let file = writer
            .into_inner()
            .map_err(|err| JournalError::persistence("flush", &self.path, err.error()))?;
        file.sync_all()
            .map_err(|err| JournalError::persistence("sync", &self.path, err))?;

        tracing::debug!(date = %entry.date, emotion = %entry.emotion, path = %self.path.display(), "mood entry appended");
        Ok(())
    }

    /// Every entry in append order.  A missing log is an empty journal.
    ///
    /// Rows that cannot be decoded are skipped with a warning; I/O failures
    /// are returned as [`JournalError::Persistence`].
    pub fn load_all(&self) -> JournalResult<Vec<Entry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|err| JournalError::persistence("open", &self.path, err))?;

        let mut entries = Vec::new();
        let mut corrupt_count = 0usize;

        for result in reader.deserialize::<Entry>() {
            match result {
                Ok(entry) => entries.push(entry),
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(JournalError::persistence("read", &self.path, err));
                }
                Err(err) => {
                    corrupt_count += 1;
                    tracing::warn!(
                        line = err.position().map(|pos| pos.line()),
                        error = %err,
                        path = %self.path.display(),
                        "corrupt mood log row, skipping"
                    );
                }
            }
        }

        if corrupt_count > 0 {
            tracing::warn!(
                corrupt_rows = corrupt_count,
                path = %self.path.display(),
                "mood log loaded with skipped rows"
            );
        }

        Ok(entries)
    }

    /// Write the whole log, header included, as CSV to `out`.
    pub fn export<W: Write>(&self, out: W) -> JournalResult<usize> {
        let entries = self.load_all()?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        writer
            .write_record(COLUMNS)
            .map_err(|err| JournalError::persistence("export", &self.path, err))?;
        for entry in &entries {
            writer
                .serialize(entry)
                .map_err(|err| JournalError::persistence("export", &self.path, err))?;
        }
        writer
            .flush()
            .map_err(|err| JournalError::persistence("export", &self.path, err))?;
        Ok(entries.len())
    }
}
