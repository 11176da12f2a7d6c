// errors.rs
use std::fmt;

use reqwest::StatusCode;

/// Errors originating from either API (catalog or CMS) or from startup
/// configuration. A listing skipped for having no images is not an error;
/// it is a counted outcome.
#[derive(Debug)]
pub enum SyncError {
    /// Rate-limit retries used up without a successful response.
    FetchExhausted { url: String, status: StatusCode },
    /// Transport-level failure: no response was received at all.
    Network(String),
    /// A non-rate-limit 4xx/5xx from either API.
    Upstream {
        url: String,
        status: StatusCode,
        body: String,
    },
    /// Response arrived but its JSON was not in the expected shape.
    Decode { url: String, detail: String },
    Config(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::FetchExhausted { url, status } => {
                write!(f, "Retries exhausted for {url} (last status {status})")
            }
            SyncError::Network(msg) => write!(f, "Network error: {msg}"),
            SyncError::Upstream { url, status, body } => {
                write!(f, "Upstream error {status} from {url}: {body}")
            }
            SyncError::Decode { url, detail } => {
                write!(f, "Malformed response from {url}: {detail}")
            }
            SyncError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}
