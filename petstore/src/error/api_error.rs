//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use petstore::error::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Validation(e) => eprintln!("Invalid response: {e}"),
///         ApiError::Auth(e) => eprintln!("Auth failed: {e}"),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client errors (network, timeout, status failures).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Request encoding and response parsing errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication and authorization errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            Self::Auth(e) => e.status(),
            _ => None,
        }
    }
}
