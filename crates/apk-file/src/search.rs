use std::time::Duration;

use crate::error::ApkFileError;
use crate::extract::{ContentsDocument, Extraction, extract};
use crate::fetch::{ContentsFetcher, HttpFetcher};
use crate::pattern;
use crate::query::{
    Architecture, Branch, Choice, DEFAULT_ENDPOINT, Repository, SearchDefaults, SearchQuery,
    Wildcard,
};

/// Settings of the fetch boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub endpoint: String,
    /// Applies to the whole request; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub defaults: SearchDefaults,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            defaults: SearchDefaults::default(),
        }
    }
}

impl SearchConfig {
    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.timeout)
    }
}

/// Appends `wildcard` to the raw input, splits it into globs and assembles the query.
pub fn build_query(
    input: &str,
    wildcard: Option<Wildcard>,
    branch: Branch,
    repository: Repository,
    architecture: Architecture,
) -> SearchQuery {
    let input = match wildcard {
        Some(wildcard) => format!("{input}{}", wildcard.as_str()),
        None => input.to_string(),
    };
    let patterns = pattern::split(&input);
    tracing::debug!(
        input = %input,
        file = %patterns.file,
        path = %patterns.dir,
        "split query"
    );
    SearchQuery::new(patterns, branch, repository, architecture)
}

/// Runs one lookup: fetch the results page for `query`, parse it and extract its rows.
pub fn search<F>(
    fetcher: &F,
    endpoint: &str,
    query: &SearchQuery,
) -> Result<Extraction, ApkFileError>
where
    F: ContentsFetcher + ?Sized,
{
    let url = query.url(endpoint)?;
    tracing::debug!("requesting from {url}");
    let body = fetcher.fetch(&url)?;
    let document = ContentsDocument::parse(&body).map_err(|err| err.context(&url))?;
    let extraction = extract(&document);
    tracing::info!(
        records = extraction.records.len(),
        warnings = extraction.warnings.len(),
        "extracted contents"
    );
    Ok(extraction)
}
