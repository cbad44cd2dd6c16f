//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP client layer.
///
/// These errors represent network-level failures and non-success HTTP
/// status codes encountered during request execution.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status code.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
}

impl ClientError {
    /// Returns `true` if retrying the request could plausibly succeed.
    ///
    /// Covers transient transport failures, 5xx responses, and 429
    /// rate-limit responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
        }
    }

    /// Returns the HTTP status code if one is available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_500_is_retryable() {
        let err = ClientError::HttpStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_429_is_retryable() {
        let err = ClientError::HttpStatus {
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_404_not_retryable() {
        let err = ClientError::HttpStatus {
            status: 404,
            message: "Pet not found".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), Some(404));
    }
}
