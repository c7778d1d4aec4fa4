// src/github/error.rs
// =============================================================================
// Errors that can happen while fetching repositories.
//
// Callers only ever show these as a single line of text (the data source
// stores `error.to_string()`), so every variant's message names what went
// wrong in plain words.
// =============================================================================

use std::fmt;
use thiserror::Error;

/// Which of the two GitHub requests a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoRequest {
    Owned,
    Starred,
}

impl fmt::Display for RepoRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoRequest::Owned => write!(f, "owned repositories"),
            RepoRequest::Starred => write!(f, "starred repositories"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// GitHub answered, but not with a 2xx status
    #[error("failed to fetch {request}: status {status}")]
    Status { request: RepoRequest, status: u16 },

    /// The body was not the JSON we expected
    #[error("failed to decode {request}: {source}")]
    Decode {
        request: RepoRequest,
        #[source]
        source: serde_json::Error,
    },

    /// Network-level failure (DNS, TLS, connection reset, ...)
    #[error("request to GitHub failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured API base could not be turned into an endpoint URL
    #[error("invalid GitHub API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_request_and_code() {
        let err = FetchError::Status {
            request: RepoRequest::Starred,
            status: 403,
        };
        assert_eq!(err.to_string(), "failed to fetch starred repositories: status 403");
    }

    #[test]
    fn test_decode_message_names_request() {
        let source = serde_json::from_str::<Vec<u64>>("{").unwrap_err();
        let err = FetchError::Decode {
            request: RepoRequest::Owned,
            source,
        };
        assert!(err.to_string().starts_with("failed to decode owned repositories: "));
    }
}
