//! HTTP Basic authentication.

use reqwest::RequestBuilder;

/// HTTP Basic authentication (username and password).
///
/// Generates `Authorization: Basic <base64(username:password)>` on outgoing
/// requests. Without a username the interceptor is a pass-through.
#[derive(Debug, Clone, Default)]
pub struct HttpBasicAuth {
    username: Option<String>,
    password: Option<String>,
}

impl HttpBasicAuth {
    /// Creates an empty Basic auth scheme with no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Basic auth scheme with credentials.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Sets the credentials in place.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.username = Some(username.into());
        self.password = Some(password.into());
    }

    /// Returns the configured username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Attaches the credentials to an outgoing request.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(username) => request.basic_auth(username, self.password.as_deref()),
            None => request,
        }
    }
}
