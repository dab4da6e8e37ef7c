// src/error.rs
// =============================================================================
// Typed errors for the two places where failure has a meaning of its own:
//
// - FetchError: one repository's metadata could not be turned into a record.
//   The ranking absorbs these (logs them and leaves the repository out).
// - PageFetchError: the awesome-list page itself could not be retrieved.
//   Nothing can be ranked without it, so this one ends the run.
//
// Everything else in the application uses anyhow::Result (see main.rs).
//
// Rust concepts:
// - thiserror: derive macro that writes the Display and Error impls for us
// - #[source]: keeps the underlying error reachable for error chains
// =============================================================================

use thiserror::Error;

/// Why a single metadata fetch produced no record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection error, timeout, unreadable body, or a body that is not JSON.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: TransportCause,
    },

    /// The body was JSON but not a repository object.
    ///
    /// GitHub answers unauthenticated or rate-limited requests with
    /// `{"message": "..."}`, which lands here.
    #[error("response from {endpoint} is malformed: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

/// The low-level cause behind [`FetchError::Transport`].
#[derive(Debug, Error)]
pub enum TransportCause {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("body is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The endpoint the failed request was sent to
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Transport { endpoint, .. } => endpoint,
            FetchError::MalformedResponse { endpoint, .. } => endpoint,
        }
    }

    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::MalformedResponse { .. } => "malformed_response",
        }
    }
}

/// The awesome-list page could not be retrieved.
#[derive(Debug, Error)]
pub enum PageFetchError {
    #[error("could not reach {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}
