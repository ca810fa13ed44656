//! Seams to the external capabilities the core depends on.
//!
//! The hosting application constructs each implementation once at startup
//! and passes it by reference into the core; the core itself holds no
//! global state.  All calls are synchronous and blocking.

use std::path::Path;

use anyhow::Result;

use crate::schema::Classification;

/// Maps one text to a sentiment and an emotion label with confidences.
pub trait Classifier {
    fn analyze(&self, text: &str) -> Result<Classification>;
}

/// Maps a block of text to a shorter text.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> Result<String>;
}

/// Maps recorded audio to text.
pub trait Transcriber {
    fn transcribe(&self, audio: &Path) -> Result<String>;
}

/// Delivers a plain-text message to a recipient address.
pub trait Mailer {
    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}
