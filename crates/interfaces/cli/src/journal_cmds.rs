use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use mood_config::AppConfig;
use mood_journal::aggregate::counts_by_date_and_emotion;
use mood_journal::compose::render_word_table;
use mood_journal::mail::dispatch_journal;
use mood_journal::reflection::reflection_for;
use mood_journal::summary::SummaryPolicy;
use mood_journal::window::trailing_window;
use mood_journal::{
    Classifier, EntryRecorder, EntryStore, Mailer, MoodCountMatrix, ReportBuilder, SummarySection,
    WeeklyReport,
};

use crate::capabilities::Capabilities;

fn report_builder<'a>(capabilities: &'a Capabilities, config: &AppConfig) -> ReportBuilder<'a> {
    let daily = SummaryPolicy {
        min_words: config.summary.min_words,
        max_chars: config.summary.daily_max_chars,
    };
    let weekly = SummaryPolicy {
        min_words: config.summary.min_words,
        max_chars: config.summary.weekly_max_chars,
    };
    ReportBuilder::new(capabilities.summarizer())
        .with_policies(daily, weekly)
        .with_top_words(config.journal.top_words)
}

fn weekly_report(
    store: &EntryStore,
    capabilities: &Capabilities,
    config: &AppConfig,
    reference: NaiveDate,
) -> Result<WeeklyReport> {
    let entries = store.load_all()?;
    Ok(report_builder(capabilities, config).weekly(&entries, reference, config.journal.window_days))
}

pub(crate) fn run_record(
    recorder: &EntryRecorder,
    classifier: &dyn Classifier,
    text: &str,
    date: NaiveDate,
) -> Result<()> {
    let entry = recorder.record_on(text, classifier, date)?;
    println!("── mood reflection ──────────────────────────────────");
    println!("  date:      {}", entry.date);
    println!("  emotion:   {} ({:.2} confidence)", entry.emotion, entry.emotion_score);
    println!("  sentiment: {} ({:.2} confidence)", entry.sentiment, entry.sentiment_score);
    println!();
    println!("  {}", reflection_for(&entry.emotion));
    Ok(())
}

pub(crate) fn run_history(store: &EntryStore, limit: usize) -> Result<()> {
    let entries = store.load_all()?;
    if entries.is_empty() {
        println!("no entries yet: record one with `mood-mirror record \"...\"`");
        return Ok(());
    }

    println!("── entries (newest first) ───────────────────────────");
    for entry in entries.iter().rev().take(limit) {
        println!(
            "  {}  {:<9} {:.2}  {:<8} {:.2}  {}",
            entry.date,
            entry.emotion,
            entry.emotion_score,
            entry.sentiment,
            entry.sentiment_score,
            one_line(&entry.text, 60)
        );
    }
    println!("  ({} of {} entries shown)", limit.min(entries.len()), entries.len());
    Ok(())
}

pub(crate) fn run_trends(store: &EntryStore, today: NaiveDate, days: Option<i64>) -> Result<()> {
    let entries = store.load_all()?;
    let entries = match days {
        Some(days) => trailing_window(&entries, today, days),
        None => entries,
    };
    let matrix = counts_by_date_and_emotion(&entries);
    println!("── mood over time ───────────────────────────────────");
    print!("{}", render_matrix(&matrix));
    Ok(())
}

pub(crate) fn run_today(
    store: &EntryStore,
    capabilities: &Capabilities,
    config: &AppConfig,
    date: NaiveDate,
) -> Result<()> {
    let entries = store.load_all()?;
    let report = report_builder(capabilities, config).daily(&entries, date);
    println!("── daily summary: {} ──────────────────────────", report.date);
    println!("  entries: {}", report.entries.len());
    println!("{}", describe_summary(&report.summary, "today"));
    Ok(())
}

pub(crate) fn run_week(
    store: &EntryStore,
    capabilities: &Capabilities,
    config: &AppConfig,
    reference: NaiveDate,
) -> Result<()> {
    let report = weekly_report(store, capabilities, config, reference)?;
    println!("── weekly summary: {} – {} ─────────────", report.start(), report.reference);
    println!("  entries: {}", report.entries.len());
    println!("{}", describe_summary(&report.summary, "this week"));

    if report.entries.is_empty() {
        return Ok(());
    }

    println!();
    println!("── most used words this week ────────────────────────");
    print!("{}", render_word_table(&report.top_words));

    println!();
    println!("── weekly emotion distribution ──────────────────────");
    print!("{}", render_matrix(&report.emotion_counts));
    for (emotion, total) in report.emotion_counts.totals_by_emotion() {
        println!("  {emotion}: {total}");
    }
    Ok(())
}

pub(crate) fn run_journal(
    store: &EntryStore,
    capabilities: &Capabilities,
    config: &AppConfig,
    reference: NaiveDate,
    out: Option<&Path>,
) -> Result<()> {
    let report = weekly_report(store, capabilities, config, reference)?;
    if let SummarySection::Failed(message) = &report.summary {
        eprintln!("warning: journal written without a summary: {message}");
    }
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &report.journal)
                .with_context(|| format!("writing journal to {}", path.display()))?;
            println!("weekly journal written to {} ({} entries)", path.display(), report.entries.len());
        }
        None => println!("{}", report.journal),
    }
    Ok(())
}

pub(crate) fn run_mail(
    store: &EntryStore,
    capabilities: &Capabilities,
    mailer: &dyn Mailer,
    config: &AppConfig,
    reference: NaiveDate,
    recipient: &str,
) -> Result<()> {
    let report = weekly_report(store, capabilities, config, reference)?;
    if report.entries.is_empty() {
        bail!(
            "no entries between {} and {}; nothing to mail",
            report.start(),
            report.reference
        );
    }
    dispatch_journal(mailer, recipient, &report.journal)?;
    println!("weekly journal sent to {}", recipient.trim());
    Ok(())
}

pub(crate) fn run_export(store: &EntryStore, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let count = store.export(file)?;
            println!("exported {count} entries to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            store.export(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

pub(crate) fn run_doctor(store: &EntryStore, config: &AppConfig, config_path: &Path) -> Result<()> {
    let entries = store.load_all()?;
    let capabilities = Capabilities::from_config(config);
    println!("mood-mirror doctor");
    println!(
        "- config: {} ({})",
        config_path.display(),
        if config_path.exists() { "found" } else { "defaults" }
    );
    println!("- mood log: {}", store.path().display());
    println!("- entries loaded: {}", entries.len());
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        println!("- date range: {} – {}", first.date, last.date);
    }
    match capabilities {
        Ok(capabilities) => println!("- provider: {}", capabilities.label()),
        Err(err) => println!("- provider: error: {err}"),
    }
    println!("- mail transport: {:?}", config.mail.transport);
    println!("- report window: {} days, top {} words", config.journal.window_days, config.journal.top_words);
    Ok(())
}

fn describe_summary(summary: &SummarySection, period: &str) -> String {
    match summary {
        SummarySection::NoEntries => format!("  no entries found for {period}."),
        SummarySection::NotEligible { words } => {
            format!("  not enough text for a summary {period} ({words} words). Try writing a bit more.")
        }
        SummarySection::Ready(text) => format!("  {text}"),
        SummarySection::Failed(message) => format!("  summary unavailable: {message}"),
    }
}

/// Zero-filled text table: one row per date, one column per emotion.
pub(crate) fn render_matrix(matrix: &MoodCountMatrix) -> String {
    if matrix.is_empty() {
        return "  (no entries)\n".to_string();
    }
    let emotions = matrix.emotions();
    let width = emotions
        .iter()
        .map(|emotion| emotion.chars().count())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut out = format!("  {:<10}", "date");
    for emotion in &emotions {
        out.push_str(&format!(" {emotion:>width$}"));
    }
    out.push('\n');
    for row in matrix.rows() {
        out.push_str(&format!("  {:<10}", row.date.to_string()));
        for count in row.counts {
            out.push_str(&format!(" {count:>width$}"));
        }
        out.push('\n');
    }
    out
}

fn one_line(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > max_chars {
        let cut: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::Result;
    use chrono::NaiveDate;
    use mood_config::AppConfig;
    use mood_journal::aggregate::counts_by_date_and_emotion;
    use mood_journal::sentiment::LexiconClassifier;
    use mood_journal::{Entry, EntryRecorder, EntryStore, Mailer};
    use tempfile::TempDir;

    use super::{one_line, render_matrix, run_export, run_mail, run_record};
    use crate::capabilities::Capabilities;

    #[derive(Default)]
    struct Outbox {
        sent: RefCell<Vec<String>>,
    }

    impl Mailer for Outbox {
        fn send(&self, recipient: &str, _subject: &str, body: &str) -> Result<()> {
            self.sent.borrow_mut().push(format!("{recipient}\n{body}"));
            Ok(())
        }
    }

    fn entry(day: u32, emotion: &str) -> Entry {
        Entry {
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            text: "x".to_string(),
            emotion: emotion.to_string(),
            emotion_score: 0.5,
            sentiment: "POSITIVE".to_string(),
            sentiment_score: 0.5,
        }
    }

    #[test]
    fn matrix_table_is_zero_filled() {
        let matrix = counts_by_date_and_emotion(&[entry(1, "joy"), entry(2, "fear"), entry(2, "fear")]);
        let table = render_matrix(&matrix);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  date       fear  joy");
        assert_eq!(lines[1], "  2024-04-01    0    1");
        assert_eq!(lines[2], "  2024-04-02    2    0");
    }

    #[test]
    fn matrix_columns_align_for_non_ascii_labels() {
        let matrix = counts_by_date_and_emotion(&[entry(1, "ärger"), entry(1, "joy")]);
        let table = render_matrix(&matrix);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "  date         joy ärger");
        assert_eq!(lines[1], "  2024-04-01     1     1");
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn empty_matrix_has_placeholder() {
        let matrix = counts_by_date_and_emotion(&[]);
        assert_eq!(render_matrix(&matrix), "  (no entries)\n");
    }

    #[test]
    fn one_line_flattens_and_truncates() {
        assert_eq!(one_line("a\nb   c", 10), "a b c");
        assert_eq!(one_line("abcdefghijkl", 5), "abcd…");
    }

    #[test]
    fn record_then_export_writes_header_and_row() {
        let dir = TempDir::new().unwrap();
        let store = EntryStore::new(dir.path().join("mood_log.csv"));
        let recorder = EntryRecorder::new(store.clone());
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        run_record(&recorder, &LexiconClassifier, "a happy and calm morning", day).unwrap();

        let out = dir.path().join("export.csv");
        run_export(&store, Some(out.as_path())).unwrap();
        let exported = std::fs::read_to_string(&out).unwrap();
        let mut lines = exported.lines();
        assert_eq!(
            lines.next(),
            Some("date,text,emotion,emotion_score,sentiment,sentiment_score")
        );
        assert!(lines.next().unwrap().starts_with("2024-06-03,a happy and calm morning,joy,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn blank_reflection_is_rejected() {
        let dir = TempDir::new().unwrap();
        let recorder = EntryRecorder::new(EntryStore::new(dir.path().join("mood_log.csv")));
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(run_record(&recorder, &LexiconClassifier, "   ", day).is_err());
        assert!(!recorder.store().path().exists());
    }

    #[test]
    fn mail_refuses_an_empty_week() {
        let dir = TempDir::new().unwrap();
        let store = EntryStore::new(dir.path().join("mood_log.csv"));
        let config = AppConfig::default();
        let capabilities = Capabilities::from_config(&config).unwrap();
        let outbox = Outbox::default();
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let err = run_mail(&store, &capabilities, &outbox, &config, day, "me@example.com").unwrap_err();
        assert!(err.to_string().contains("nothing to mail"), "{err}");
        assert!(outbox.sent.borrow().is_empty());

        let recorder = EntryRecorder::new(store.clone());
        run_record(&recorder, &LexiconClassifier, "a calm walk by the river", day).unwrap();
        run_mail(&store, &capabilities, &outbox, &config, day, "me@example.com").unwrap();
        let sent = outbox.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("a calm walk by the river"));
    }
}
