//! API key authentication.

use reqwest::RequestBuilder;

/// Where an API key is placed on outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLocation {
    /// Key is sent as a request header.
    Header,
    /// Key is appended as a query parameter.
    Query,
}

/// API key authentication for a single named parameter.
///
/// The Petstore `api_key` scheme sends the key as an `api_key` header, but
/// the type supports query placement as well. Until a key value is set the
/// interceptor is a pass-through, so registering the scheme without
/// credentials never breaks unauthenticated calls.
///
/// ## Examples
///
/// ```rust,ignore
/// use petstore::auth::ApiKeyAuth;
///
/// let auth = ApiKeyAuth::header("api_key").with_key("secret");
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    location: KeyLocation,
    param_name: String,
    key: Option<String>,
}

impl ApiKeyAuth {
    /// Creates a header-placed API key scheme.
    pub fn header(param_name: impl Into<String>) -> Self {
        Self {
            location: KeyLocation::Header,
            param_name: param_name.into(),
            key: None,
        }
    }

    /// Creates a query-placed API key scheme.
    pub fn query(param_name: impl Into<String>) -> Self {
        Self {
            location: KeyLocation::Query,
            param_name: param_name.into(),
            key: None,
        }
    }

    /// Sets the key value, consuming and returning the scheme.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the key value in place.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    /// Returns the header or query parameter name the key travels under.
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Returns where the key is placed on requests.
    pub fn location(&self) -> KeyLocation {
        self.location
    }

    /// Returns the configured key value, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Attaches the key to an outgoing request.
    ///
    /// Requests pass through untouched when no key has been set.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(key) = &self.key else {
            return request;
        };

        match self.location {
            KeyLocation::Header => request.header(self.param_name.as_str(), key.as_str()),
            KeyLocation::Query => request.query(&[(self.param_name.as_str(), key.as_str())]),
        }
    }
}
