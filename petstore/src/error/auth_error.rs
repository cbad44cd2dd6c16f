//! Authentication and authorization errors.

use thiserror::Error;

use crate::auth::OAuthFlow;

/// Errors related to API authentication.
///
/// These errors occur while configuring credentials, while talking to the
/// OAuth token endpoint, or when the server rejects a request outright.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Server rejected the request credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message from the server.
        message: String,
    },

    /// Insufficient permissions for the requested operation (HTTP 403).
    #[error("Insufficient permissions: {operation}")]
    InsufficientPermissions {
        /// The operation that was denied.
        operation: String,
    },

    /// A credential required by the configured OAuth flow is not set.
    #[error("Missing credential: {field}")]
    MissingCredential {
        /// The name of the missing credential.
        field: &'static str,
    },

    /// The configured OAuth flow cannot request tokens directly.
    ///
    /// Browser-redirect flows obtain tokens out of band; only the
    /// resource-owner-password and client-credentials flows (or a held
    /// refresh token) can call the token endpoint from this client.
    #[error("Cannot request a token for the {flow} flow")]
    UnsupportedFlow {
        /// The flow that was configured.
        flow: OAuthFlow,
    },

    /// The token endpoint returned a non-success status.
    #[error("Token endpoint returned HTTP {status}: {message}")]
    TokenEndpoint {
        /// The HTTP status code returned.
        status: u16,
        /// Error body from the token endpoint.
        message: String,
    },

    /// The token request failed at the transport level.
    #[error("Token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),
}

impl AuthError {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { .. } => Some(401),
            Self::InsufficientPermissions { .. } => Some(403),
            Self::TokenEndpoint { status, .. } => Some(*status),
            Self::TokenRequest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
