//! Error types for the Radio Browser client

/// Result type alias for Radio Browser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when querying a Radio Browser mirror
///
/// The set is closed: every call either yields a decoded value or exactly one
/// of these variants. None of them is retried by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network-level failure (DNS, connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response carried no usable HTTP status
    #[error("Invalid HTTP response")]
    InvalidResponse,

    /// The response body could not be read
    #[error("Unable to read response data")]
    InvalidResponseData,

    /// The body of a 200 response was not the expected JSON
    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be composed
    #[error("Malformed URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The mirror answered 503
    #[error("Service unavailable (HTTP 503)")]
    ServiceUnavailable,

    /// The mirror answered with a status the client does not handle
    #[error("Unhandled HTTP status code: {0}")]
    UnhandledStatus(u16),
}

impl Error {
    /// Create a malformed URL error
    pub fn malformed_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            source,
        }
    }

    /// HTTP status code attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::ServiceUnavailable => Some(503),
            Error::UnhandledStatus(code) => Some(*code),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether another mirror might answer the same request successfully
    ///
    /// The client never retries on its own; callers that want to try the next
    /// mirror can use this to decide.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::ServiceUnavailable | Error::InvalidResponseData
        )
    }
}
