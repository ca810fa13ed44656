//! Plain-text weekly journal document.
//!
//! Layout:
//!
//! ```text
//! # Weekly Mood Journal
//!
//! ## Summary:
//! <summary or NO_SUMMARY_MARKER>
//!
//! ## Most Used Words:
//! - word: count
//!
//! ## Entries:
//! <text>
//! ---
//! <text>
//! ```

use std::fmt::Write as _;

pub const JOURNAL_TITLE: &str = "# Weekly Mood Journal";
pub const NO_SUMMARY_MARKER: &str = "(no summary available)";
pub const ENTRY_DELIMITER: &str = "\n---\n";

/// Render the journal.  Pure string assembly: identical inputs always
/// produce byte-identical output.
pub fn compose<S: AsRef<str>>(
    week_summary: Option<&str>,
    top_words: &[(String, usize)],
    weekly_entries: &[S],
) -> String {
    let mut out = String::new();
    out.push_str(JOURNAL_TITLE);
    out.push_str("\n\n## Summary:\n");
    out.push_str(week_summary.unwrap_or(NO_SUMMARY_MARKER));
    out.push_str("\n\n## Most Used Words:\n");
    let word_lines: Vec<String> = top_words
        .iter()
        .map(|(word, count)| format!("- {word}: {count}"))
        .collect();
    out.push_str(&word_lines.join("\n"));
    out.push_str("\n\n## Entries:\n");
    let texts: Vec<&str> = weekly_entries.iter().map(AsRef::as_ref).collect();
    out.push_str(&texts.join(ENTRY_DELIMITER));
    out
}

/// Human-readable `(word, count)` list used by the CLI.
pub fn render_word_table(top_words: &[(String, usize)]) -> String {
    let mut out = String::new();
    for (word, count) in top_words {
        let _ = writeln!(out, "- {word}: {count} times");
    }
    out
}
