//! Search Alpine package contents by filename and export the matches as tables.
//!
//! The pipeline is [`pattern::split`] → [`SearchQuery`] → [`ContentsFetcher`] →
//! [`extract()`] → [`export()`]. Only the fetch performs I/O.

pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod pattern;
pub mod query;
pub mod record;
pub mod search;

pub use error::ApkFileError;
pub use export::{ExportFormat, Exported, export, export_named};
pub use extract::{ContentsDocument, Extraction, ExtractionWarning, WarningKind, extract};
pub use fetch::{ContentsFetcher, HttpFetcher};
pub use pattern::{SearchPatterns, split};
pub use query::{
    Architecture, Branch, Choice, DEFAULT_ENDPOINT, Repository, SearchDefaults, SearchQuery,
    Wildcard,
};
pub use record::{FileRecord, HEADER, RecordSet};
pub use search::{SearchConfig, build_query, search};
