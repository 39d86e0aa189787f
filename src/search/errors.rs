//! Error types for the footprint search call
//!
//! Every variant maps to the message shown to the user through
//! [`SearchError::user_message`]; `Display` keeps the technical detail for
//! logs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Error types for the search call
#[derive(Debug, Error)]
pub enum SearchError {
    /// Neither a name nor a photo was given
    #[error("No name or photo given")]
    MissingInput,

    /// The photo could not be read from disk
    #[error("Failed to read photo {path}: {source}")]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend could not be reached
    #[error("Failed to connect to search backend: {0}")]
    Connect(#[source] reqwest::Error),

    /// The backend did not answer within the request timeout
    #[error("Search request timed out")]
    Timeout,

    /// The backend answered with a non-success status
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// The backend answered 2xx without a results array
    #[error("Invalid results format: {0}")]
    InvalidFormat(String),

    /// The user cancelled the search
    #[error("Search cancelled")]
    Cancelled,

    /// Any other transport error
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SearchError::Timeout
        } else if error.is_connect() {
            SearchError::Connect(error)
        } else {
            SearchError::Request(error)
        }
    }
}

impl SearchError {
    /// Message for the person running the search
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SearchError::MissingInput => "Enter a name or upload a photo.".to_string(),
            SearchError::Cancelled => "Search cancelled by user".to_string(),
            SearchError::Connect(_) => {
                "Cannot connect to server. Please ensure the backend is running on port 8001."
                    .to_string()
            }
            SearchError::Server { status: 500, .. } => {
                "Server error occurred. Please check the backend logs.".to_string()
            }
            SearchError::Server { status: 422, .. } => {
                "Invalid request. Please check your input.".to_string()
            }
            other => format!("Search failed: {other}. Please check if the backend is running."),
        }
    }

    /// Whether running the same search again could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Connect(_) | SearchError::Timeout => true,
            SearchError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_specific_messages() {
        let internal = SearchError::Server {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            internal.user_message(),
            "Server error occurred. Please check the backend logs."
        );
        assert!(internal.is_transient());

        let invalid = SearchError::Server {
            status: 422,
            body: String::new(),
        };
        assert_eq!(invalid.user_message(), "Invalid request. Please check your input.");
        assert!(!invalid.is_transient());
    }

    #[test]
    fn fallback_message_wraps_detail() {
        let error = SearchError::InvalidFormat("missing results".to_string());
        assert_eq!(
            error.user_message(),
            "Search failed: Invalid results format: missing results. Please check if the backend is running."
        );
        assert_eq!(SearchError::Cancelled.user_message(), "Search cancelled by user");
        assert_eq!(
            SearchError::MissingInput.user_message(),
            "Enter a name or upload a photo."
        );
    }
}
