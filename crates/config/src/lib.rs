use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ── Mail transport ────────────────────────────────────────────────────────────

/// Selects how `mood-mirror mail` delivers the weekly journal.
///
/// | Transport | Behaviour                                                    |
/// |-----------|--------------------------------------------------------------|
/// | `draft`   | Message is written to `journal.drafts_dir`; nothing leaves the machine. |
/// | `smtp`    | Message is sent through the configured STARTTLS relay.       |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    #[default]
    Draft,
    Smtp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// CSV mood log.  Overridden at runtime by `MOOD_LOG_PATH` when set.
    pub log_path: String,
    /// Length of the trailing report window in days.  The window is
    /// inclusive on both ends, so `7` covers eight calendar dates.
    pub window_days: i64,
    /// Number of rows in the "most used words" table.
    pub top_words: usize,
    /// Where the `draft` mail transport writes outgoing messages.
    pub drafts_dir: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            log_path: ".mood/mood_log.csv".to_string(),
            window_days: 7,
            top_words: 10,
            drafts_dir: ".mood/drafts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Texts with this many words or fewer are not summarized.
    pub min_words: usize,
    /// Character cap applied to the daily text before summarization.
    pub daily_max_chars: usize,
    /// Character cap applied to the weekly text before summarization.
    pub weekly_max_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_words: 50,
            daily_max_chars: 1024,
            weekly_max_chars: 2048,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `lexicon` (offline heuristics) or `ollama`.
    pub provider: String,
    pub ollama_model: String,
    /// Base URL for the Ollama API.  Overridden at runtime by the
    /// `OLLAMA_BASE_URL` environment variable when set.
    pub ollama_base_url: String,
    /// HTTP timeout for a single classification or summary request.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "lexicon".to_string(),
            ollama_model: "llama3.1:8b".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub from_address: String,
    /// Never read from the config file; populated from `MOOD_SMTP_PASSWORD`.
    #[serde(skip)]
    pub password: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Draft,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            from_address: String::new(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub journal: JournalConfig,
    pub summary: SummaryConfig,
    pub llm: LlmConfig,
    pub mail: MailConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        if let Ok(value) = env::var("OLLAMA_BASE_URL") {
            if !value.is_empty() {
                config.llm.ollama_base_url = value;
            }
        }

        if let Ok(value) = env::var("MOOD_LOG_PATH") {
            if !value.is_empty() {
                config.journal.log_path = value;
            }
        }

        if let Ok(value) = env::var("MOOD_SMTP_PASSWORD") {
            config.mail.password = value;
        }

        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    pub fn uses_ollama(&self) -> bool {
        self.llm.provider.eq_ignore_ascii_case("ollama")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_report_policy() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.summary.min_words, 50);
        assert_eq!(cfg.summary.daily_max_chars, 1024);
        assert_eq!(cfg.summary.weekly_max_chars, 2048);
        assert_eq!(cfg.journal.window_days, 7);
        assert_eq!(cfg.journal.top_words, 10);
    }

    #[test]
    fn cosmetic_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.journal.log_path, ".mood/mood_log.csv");
        assert_eq!(cfg.llm.provider, "lexicon");
        assert_eq!(cfg.llm.ollama_base_url, "http://localhost:11434");
        assert_eq!(cfg.mail.transport, MailTransport::Draft);
        assert_eq!(cfg.mail.smtp_port, 587);
        assert_eq!(cfg.telemetry.log_level, "info");
        assert!(!cfg.uses_ollama());
    }

    // ── load_from ──────────────────────────────────────────────────────────

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(cfg.journal.top_words, 10);
        assert_eq!(cfg.llm.provider, "lexicon");
    }

    #[test]
    fn load_from_partial_toml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(
            &path,
            r#"
[summary]
min_words = 20

[llm]
provider = "Ollama"

[mail]
transport = "smtp"
username = "me@example.com"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.summary.min_words, 20);
        assert_eq!(cfg.summary.weekly_max_chars, 2048);
        assert!(cfg.uses_ollama());
        assert_eq!(cfg.mail.transport, MailTransport::Smtp);
        assert_eq!(cfg.mail.username, "me@example.com");
        assert_eq!(cfg.journal.window_days, 7);
    }

    #[test]
    fn load_from_invalid_toml_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    // ── save_to + roundtrip ────────────────────────────────────────────────

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub/config.toml");

        let mut cfg = AppConfig::default();
        cfg.journal.window_days = 14;
        cfg.llm.ollama_model = "mistral:7b".to_string();
        cfg.mail.transport = MailTransport::Smtp;
        cfg.mail.password = "secret".to_string();

        cfg.save_to(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("secret"), "password must never be written");

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.journal.window_days, 14);
        assert_eq!(loaded.llm.ollama_model, "mistral:7b");
        assert_eq!(loaded.mail.transport, MailTransport::Smtp);
    }

    #[test]
    fn mail_transport_serde_roundtrip() {
        for (transport, label) in [
            (MailTransport::Draft, "\"draft\""),
            (MailTransport::Smtp, "\"smtp\""),
        ] {
            let json = serde_json::to_string(&transport).unwrap();
            assert_eq!(json, label);
            let back: MailTransport = serde_json::from_str(&json).unwrap();
            assert_eq!(back, transport);
        }
    }

    // ── Env var overrides ──────────────────────────────────────────────────

    #[test]
    fn env_log_path_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.toml");
        fs::write(
            &path,
            r#"
[journal]
log_path = "from-file.csv"
"#,
        )
        .unwrap();

        // SAFETY: test is single-threaded for this env var.
        unsafe { env::set_var("MOOD_LOG_PATH", "from-env.csv") };
        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.journal.log_path, "from-env.csv");
        unsafe { env::remove_var("MOOD_LOG_PATH") };
    }
}
