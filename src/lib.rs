pub mod compact;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod organize;
pub mod output;
pub mod pipeline;
pub mod search;
pub mod utils;

// Re-export commonly used items
pub use compact::CompactionRules;
pub use config::{ConferenceInfo, ScrapeConfig};
pub use fetch::{load_document, DocumentSource, FetchError, HttpSource};
pub use models::{Affiliation, Author, Conference, Day, Paper, Provenance, Schedule, Session, SessionType};
pub use organize::organize_days;
pub use pipeline::{compact_program, run, scrape_program};
pub use utils::{ascii_fold, day_key, normalize_text, parse_program_date};
