use std::time::Duration;

use anyhow::{Result, bail};

use mood_config::{AppConfig, MailTransport};
use mood_journal::extractive::LeadSummarizer;
use mood_journal::mail::DraftMailer;
use mood_journal::sentiment::LexiconClassifier;
use mood_journal::{Classifier, Mailer, Summarizer};
use mood_llm::{OllamaClassifier, OllamaClient, OllamaSummarizer};

/// Classifier and summarizer chosen by `llm.provider`, built once per run.
pub(crate) struct Capabilities {
    classifier: Box<dyn Classifier>,
    summarizer: Box<dyn Summarizer>,
    label: String,
}

impl Capabilities {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self> {
        if config.uses_ollama() {
            let client = OllamaClient::new(
                &config.llm.ollama_base_url,
                &config.llm.ollama_model,
                Duration::from_secs(config.llm.timeout_secs.max(1)),
            )?;
            return Ok(Self {
                classifier: Box::new(OllamaClassifier::new(client.clone())),
                summarizer: Box::new(OllamaSummarizer::new(client)),
                label: format!("ollama ({})", config.llm.ollama_model),
            });
        }

        if config.llm.provider.eq_ignore_ascii_case("lexicon") {
            return Ok(Self {
                classifier: Box::new(LexiconClassifier),
                summarizer: Box::new(LeadSummarizer::default()),
                label: "lexicon (offline)".to_string(),
            });
        }

        bail!(
            "unknown llm.provider '{}': expected 'lexicon' or 'ollama'",
            config.llm.provider
        )
    }

    pub(crate) fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub(crate) fn summarizer(&self) -> &dyn Summarizer {
        self.summarizer.as_ref()
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }
}

pub(crate) fn build_mailer(config: &AppConfig) -> Result<Box<dyn Mailer>> {
    match config.mail.transport {
        MailTransport::Draft => Ok(Box::new(DraftMailer::new(&config.journal.drafts_dir))),
        MailTransport::Smtp => smtp_mailer(config),
    }
}

#[cfg(feature = "smtp")]
fn smtp_mailer(config: &AppConfig) -> Result<Box<dyn Mailer>> {
    if config.mail.username.is_empty() || config.mail.password.is_empty() {
        bail!("mail.transport = \"smtp\" needs mail.username and MOOD_SMTP_PASSWORD");
    }
    Ok(Box::new(mood_journal::mail::SmtpMailer::new(
        &config.mail.smtp_host,
        config.mail.smtp_port,
        &config.mail.username,
        &config.mail.password,
        &config.mail.from_address,
    )?))
}

#[cfg(not(feature = "smtp"))]
fn smtp_mailer(_config: &AppConfig) -> Result<Box<dyn Mailer>> {
    bail!("this build has no SMTP support; rebuild with `--features smtp` or set mail.transport = \"draft\"")
}
