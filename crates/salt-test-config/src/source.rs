//! Document sources.
//!
//! A source is either a local path or an HTTP(S) URL. Each fetch performs
//! exactly one read; there is no caching, retry or timeout.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::error::LoadError;
use crate::integrity;

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(Url),
}

impl Source {
    /// Interpret a reference given on the command line.
    ///
    /// References starting with `http://` or `https://` are URLs; anything
    /// else is a filesystem path.
    pub fn parse(reference: &str) -> Result<Self, LoadError> {
        if is_url(reference) {
            let url = Url::parse(reference).map_err(|e| LoadError::InvalidUrl {
                target: reference.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Source::Url(url));
        }
        Ok(Source::Path(PathBuf::from(reference)))
    }

    /// Read the raw bytes of the document.
    pub fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Source::Path(path) => {
                debug!(path = %path.display(), "Reading document");
                std::fs::read(path).map_err(|e| self.not_found(e))
            }
            Source::Url(url) => {
                debug!(url = %url, "Fetching document");
                // The blocking client defaults to a 30s timeout; fetches wait indefinitely.
                let response = Client::builder()
                    .timeout(None::<Duration>)
                    .build()
                    .and_then(|client| client.get(url.clone()).send())
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| self.not_found(e))?;
                let bytes = response.bytes().map_err(|e| self.not_found(e))?;
                Ok(bytes.to_vec())
            }
        }
    }

    /// Fetch the document as text, verifying its SHA-256 digest first when
    /// `expected_sha256` is given.
    pub fn fetch_text(&self, expected_sha256: Option<&str>) -> Result<String, LoadError> {
        let bytes = self.fetch()?;
        if let Some(expected) = expected_sha256 {
            integrity::verify(&self.to_string(), &bytes, expected)?;
        }
        String::from_utf8(bytes).map_err(|e| LoadError::Parse {
            target: self.to_string(),
            position: None,
            message: format!("document is not valid UTF-8: {}", e),
        })
    }

    fn not_found(&self, reason: impl fmt::Display) -> LoadError {
        LoadError::NotFound {
            target: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

fn is_url(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
