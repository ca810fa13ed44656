pub mod aggregate;
pub mod capability;
pub mod compose;
pub mod error;
pub mod extractive;
pub mod mail;
pub mod recorder;
pub mod reflection;
pub mod report;
pub mod schema;
pub mod sentiment;
pub mod store;
pub mod summary;
pub mod window;
pub mod words;

pub use aggregate::{MoodCountMatrix, counts_by_date_and_emotion};
pub use capability::{Classifier, Mailer, Summarizer, Transcriber};
pub use error::{JournalError, JournalResult};
pub use recorder::EntryRecorder;
pub use report::{DailyReport, ReportBuilder, SummarySection, WeeklyReport};
pub use schema::{Classification, Entry};
pub use store::EntryStore;
pub use summary::{SummaryOutcome, SummaryPolicy};
