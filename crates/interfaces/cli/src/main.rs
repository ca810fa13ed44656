mod capabilities;
mod journal_cmds;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mood_config::AppConfig;
use mood_journal::{EntryRecorder, EntryStore};

use crate::capabilities::Capabilities;

#[derive(Debug, Parser)]
#[command(
    name = "mood-mirror",
    version,
    about = "Log daily reflections and see how your mood moves over time"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify and save a reflection.
    Record {
        /// Reflection text.  Omit and pass --stdin to read it from standard input.
        text: Option<String>,
        #[arg(long)]
        stdin: bool,
        /// Record under this date (YYYY-MM-DD) instead of today.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List saved entries, newest first.
    History {
        #[arg(long, default_value_t = 20, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        limit: usize,
    },
    /// Entries per day and emotion.
    Trends {
        /// Only include the trailing N days.  All history when omitted.
        #[arg(long)]
        days: Option<i64>,
    },
    /// Summary of today's entries.
    Today {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Weekly summary, most used words and emotion distribution.
    Week {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Write the weekly journal document.
    Journal {
        /// Destination file; printed to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Send the weekly journal by mail.
    Mail {
        #[arg(long)]
        to: String,
    },
    /// Export the mood log as CSV.
    Export {
        /// Destination file; printed to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show configuration and log status.
    Doctor,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(
        config = %cli.config.display(),
        log_path = %config.journal.log_path,
        provider = %config.llm.provider,
        "configuration loaded"
    );

    let store = EntryStore::new(&config.journal.log_path);
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Record { text, stdin, date } => {
            let text = match (text, stdin) {
                (Some(text), false) => text,
                (None, true) => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
                (Some(_), true) => bail!("pass the reflection as an argument or with --stdin, not both"),
                (None, false) => bail!("nothing to record: pass the reflection text or --stdin"),
            };
            let capabilities = Capabilities::from_config(&config)?;
            let recorder = EntryRecorder::new(store);
            journal_cmds::run_record(&recorder, capabilities.classifier(), &text, date.unwrap_or(today))?;
        }
        Commands::History { limit } => {
            journal_cmds::run_history(&store, limit)?;
        }
        Commands::Trends { days } => {
            journal_cmds::run_trends(&store, today, days)?;
        }
        Commands::Today { date } => {
            let capabilities = Capabilities::from_config(&config)?;
            journal_cmds::run_today(&store, &capabilities, &config, date.unwrap_or(today))?;
        }
        Commands::Week { date } => {
            let capabilities = Capabilities::from_config(&config)?;
            journal_cmds::run_week(&store, &capabilities, &config, date.unwrap_or(today))?;
        }
        Commands::Journal { out, date } => {
            let capabilities = Capabilities::from_config(&config)?;
            journal_cmds::run_journal(&store, &capabilities, &config, date.unwrap_or(today), out.as_deref())?;
        }
        Commands::Mail { to } => {
            let capabilities = Capabilities::from_config(&config)?;
            let mailer = capabilities::build_mailer(&config)?;
            journal_cmds::run_mail(&store, &capabilities, mailer.as_ref(), &config, today, &to)?;
        }
        Commands::Export { out } => {
            journal_cmds::run_export(&store, out.as_deref())?;
        }
        Commands::Doctor => {
            journal_cmds::run_doctor(&store, &config, &cli.config)?;
        }
    }

    Ok(())
}
