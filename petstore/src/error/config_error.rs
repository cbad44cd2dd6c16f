//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These errors occur while assembling an [`ApiClientBuilder`] or turning it
/// into a client, typically indicating programmer errors or invalid
/// configuration.
///
/// [`ApiClientBuilder`]: crate::client::ApiClientBuilder
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested auth scheme name is not defined by the Petstore API.
    #[error("Unknown auth scheme: {name}")]
    UnknownAuthScheme {
        /// The scheme name that was requested.
        name: String,
    },

    /// An auth scheme with the same name is already registered.
    #[error("Auth scheme already registered: {name}")]
    DuplicateAuthScheme {
        /// The scheme name that collided.
        name: String,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
}

impl ConfigError {
    /// Creates an unknown auth scheme error.
    pub fn unknown_scheme(name: impl Into<String>) -> Self {
        Self::UnknownAuthScheme { name: name.into() }
    }

    /// Creates a duplicate auth scheme error.
    pub fn duplicate_scheme(name: impl Into<String>) -> Self {
        Self::DuplicateAuthScheme { name: name.into() }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scheme() {
        let err = ConfigError::unknown_scheme("petstore_oauth");
        assert_eq!(err.to_string(), "Unknown auth scheme: petstore_oauth");
    }

    #[test]
    fn test_duplicate_scheme() {
        let err = ConfigError::duplicate_scheme("api_key");
        assert_eq!(err.to_string(), "Auth scheme already registered: api_key");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("authorization_url");
        assert_eq!(err.to_string(), "Missing required field: authorization_url");
    }
}
