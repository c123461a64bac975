use std::io::Read;
use std::time::Duration;

use url::Url;

use crate::error::ApkFileError;

const USER_AGENT: &str = concat!("apk-file/", env!("CARGO_PKG_VERSION"));

/// Fetches the raw body of a contents search page.
pub trait ContentsFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ApkFileError>;
}

/// Default HTTPS fetcher backed by `ureq`. Performs exactly one request; no retries.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Builds a fetcher. Without a timeout a stalled server blocks indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl ContentsFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ApkFileError> {
        let response = match self.agent.get(url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(ApkFileError::Fetch {
                    url: url.to_string(),
                    message: format!("received {code} ({})", response.status_text()),
                });
            }
            Err(err) => {
                return Err(ApkFileError::Fetch {
                    url: url.to_string(),
                    message: err.to_string(),
                });
            }
        };

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|err| ApkFileError::Fetch {
                url: url.to_string(),
                message: format!("failed reading body: {err}"),
            })?;
        tracing::debug!(url = %url, bytes = body.len(), "fetched contents page");
        Ok(body)
    }
}
