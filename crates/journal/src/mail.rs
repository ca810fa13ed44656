use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use crate::capability::Mailer;
use crate::error::{JournalError, JournalResult};

pub const JOURNAL_SUBJECT: &str = "Your Weekly Mood Journal";

/// Send an already-composed journal to `recipient`.
///
/// A failed send is reported once as [`JournalError::Dispatch`]; the journal
/// itself is unaffected and can be retried by the caller.
pub fn dispatch_journal(mailer: &dyn Mailer, recipient: &str, journal: &str) -> JournalResult<()> {
    let recipient = recipient.trim();
    if recipient.is_empty() || !recipient.contains('@') {
        return Err(JournalError::Validation(format!(
            "'{recipient}' is not an email address"
        )));
    }

    mailer
        .send(recipient, JOURNAL_SUBJECT, journal)
        .map_err(|err| JournalError::Dispatch(format!("sending journal to {recipient}: {err:#}")))?;
    tracing::info!(recipient, bytes = journal.len(), "weekly journal dispatched");
    Ok(())
}

/// Writes each message to `{drafts_dir}/{timestamp}_{subject}.txt` instead of
/// sending it.
#[derive(Debug, Clone)]
pub struct DraftMailer {
    pub drafts_dir: PathBuf,
}

impl DraftMailer {
    pub fn new(drafts_dir: impl Into<PathBuf>) -> Self {
        Self {
            drafts_dir: drafts_dir.into(),
        }
    }
}

impl Mailer for DraftMailer {
    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        std::fs::create_dir_all(&self.drafts_dir)?;

        // Build a filesystem-safe filename from timestamp + subject.
        let safe_subject: String = subject
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .take(40)
            .collect();
        let now = Utc::now();
        let filename = format!("{}_{safe_subject}.txt", now.format("%Y%m%d_%H%M%S%3f"));
        let draft_path = self.drafts_dir.join(&filename);

        let content = format!(
            "To: {recipient}\nSubject: {subject}\nDate: {}\n\n{body}",
            now.to_rfc2822()
        );
        std::fs::write(&draft_path, &content)?;
        tracing::debug!(path = %draft_path.display(), bytes = content.len(), "mail draft written");
        Ok(())
    }
}

#[cfg(feature = "smtp")]
pub use smtp::SmtpMailer;

#[cfg(feature = "smtp")]
mod smtp {
    use anyhow::{Context, Result};
    use lettre::message::header::ContentType;
    use lettre::transport::smtp::authentication::Credentials;
    use lettre::{Message, SmtpTransport, Transport};

    use crate::capability::Mailer;

    /// Sends through a STARTTLS relay with username/password login.
    pub struct SmtpMailer {
        transport: SmtpTransport,
        from: String,
    }

    impl SmtpMailer {
        pub fn new(host: &str, port: u16, username: &str, password: &str, from: &str) -> Result<Self> {
            let transport = SmtpTransport::starttls_relay(host)
                .with_context(|| format!("configuring SMTP relay {host}"))?
                .port(port)
                .credentials(Credentials::new(username.to_string(), password.to_string()))
                .build();
            let from = if from.is_empty() { username } else { from };
            Ok(Self {
                transport,
                from: from.to_string(),
            })
        }
    }

    impl Mailer for SmtpMailer {
        fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
            let message = Message::builder()
                .from(self.from.parse().context("invalid sender address")?)
                .to(recipient.parse().context("invalid recipient address")?)
                .subject(subject)
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_string())?;
            self.transport.send(&message)?;
            Ok(())
        }
    }
}
