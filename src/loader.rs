//! Resume document loading.
//!
//! Exactly one source is authoritative per run: either the remote URL or a
//! local file. Failures are returned as [`LoadError`]; deciding whether to
//! terminate is left to the caller.

use crate::fetch::{Fetch, FetchError};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where the resume document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    Remote(String),
    Local(PathBuf),
}

impl fmt::Display for ResumeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not get resume JSON")]
    Fetch(#[from] FetchError),

    #[error("could not get resume JSON from {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not read resume file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("resume from {source_ref} is not valid JSON")]
    Parse {
        source_ref: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads and parses the resume document.
///
/// With `debug` set the raw payload is echoed to stdout, pretty printed when
/// it parses.
///
/// # Errors
///
/// Returns [`LoadError`] on transport failure, a non-2xx status, an unreadable
/// local file or malformed JSON.
pub fn load_resume(
    fetcher: &dyn Fetch,
    source: &ResumeSource,
    debug: bool,
) -> Result<Value, LoadError> {
    let bytes = match source {
        ResumeSource::Remote(url) => {
            tracing::info!(%url, "fetching resume");
            let response = fetcher.get(url)?;
            if !response.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: response.status,
                });
            }
            response.body
        }
        ResumeSource::Local(path) => {
            tracing::info!(path = %path.display(), "reading resume");
            std::fs::read(path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?
        }
    };

    let parsed = serde_json::from_slice::<Value>(&bytes);

    if debug {
        echo_payload(&bytes, parsed.as_ref().ok());
    }

    parsed.map_err(|err| LoadError::Parse {
        source_ref: source.to_string(),
        source: err,
    })
}

fn echo_payload(raw: &[u8], parsed: Option<&Value>) {
    match parsed.and_then(|v| serde_json::to_string_pretty(v).ok()) {
        Some(pretty) => println!("{}", pretty),
        None => println!("{}", String::from_utf8_lossy(raw)),
    }
}
