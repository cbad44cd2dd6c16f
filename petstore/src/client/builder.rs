//! Client configuration.
//!
//! [`ApiClientBuilder`] collects everything a client needs (base URL,
//! transport, auth schemes, logging) and [`build`](ApiClientBuilder::build)
//! freezes it into an immutable [`ApiClient`]. All validation is eager:
//! registering an unknown or duplicate scheme fails at the call site, not
//! on the first request.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::auth::{
    AuthInterceptor, AuthRegistry, AuthorizationEndpoint, OAuth2Token, OAuthFlow, TokenEndpoint,
};
use crate::client::executor::{ApiClient, ClientInner};
use crate::client::logging::{HttpLogger, LogSink};
use crate::error::{ApiError, ClientError, ConfigError};

/// Environment variable consulted for the default server URL.
const SERVER_URL_ENV: &str = "PETSTORE_SERVER_URL";

/// Base URL of the public Petstore server.
pub const DEFAULT_BASE_URL: &str = "http://petstore.swagger.io/v2/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent by the default transport.
const USER_AGENT: &str = concat!("petstore/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring an [`ApiClient`].
///
/// ## Examples
///
/// ```rust,ignore
/// use petstore::client::ApiClientBuilder;
/// use petstore::apis::PetApi;
///
/// let client = ApiClientBuilder::with_auth_schemes(["petstore_auth"])?
///     .set_access_token("my-token")
///     .build()?;
/// let pets: PetApi = client.service();
/// ```
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    transport_builder: Option<reqwest::ClientBuilder>,
    call_factory: Option<reqwest::Client>,
    auth: AuthRegistry,
    log_callback: Option<LogSink>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClientBuilder {
    /// Creates a builder pointing at the default server.
    ///
    /// The base URL comes from the `PETSTORE_SERVER_URL` environment
    /// variable when set, falling back to the public Petstore server. A
    /// missing trailing slash is appended so relative endpoint paths
    /// resolve under the URL's path prefix.
    pub fn new() -> Self {
        let base_url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(base_url),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport_builder: None,
            call_factory: None,
            auth: AuthRegistry::new(),
            log_callback: None,
        }
    }

    /// Creates a builder with the named Petstore auth schemes registered.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownAuthScheme`] for names the API does
    /// not define and [`ConfigError::DuplicateAuthScheme`] for repeats.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let builder = ApiClientBuilder::with_auth_schemes(["petstore_auth", "api_key"])?;
    /// ```
    pub fn with_auth_schemes<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for name in names {
            builder = builder.add_auth_scheme(name.as_ref())?;
        }
        Ok(builder)
    }

    /// Creates a builder with `petstore_auth` registered and OAuth
    /// credentials piped into its token endpoint.
    ///
    /// The credentials let a 401 be recovered by running the
    /// resource-owner-password grant, even before any token is held.
    ///
    /// ## Errors
    ///
    /// Propagates scheme registration failures, which cannot occur for
    /// this fixed scheme list in practice.
    pub fn with_oauth_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Self::with_auth_schemes(["petstore_auth"])?;
        if let Some(oauth) = builder.auth.first_oauth_mut() {
            oauth.set_flow(OAuthFlow::Password);
            oauth
                .token_endpoint_mut()
                .set_client_id(client_id)
                .set_client_secret(client_secret)
                .set_username(username)
                .set_password(password);
        }
        Ok(builder)
    }

    /// Overrides the base URL.
    ///
    /// A missing trailing slash is appended.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(url.into());
        self
    }

    /// Sets the request timeout for the default transport.
    ///
    /// Ignored when a custom transport builder or call factory is
    /// supplied, since those own their own timeout configuration.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supplies a custom transport builder.
    ///
    /// The builder is used as-is at [`build`](Self::build) time; the
    /// default timeout, user agent, and the HTTP log callback are not
    /// applied on top of it.
    #[must_use]
    pub fn transport_builder(mut self, builder: reqwest::ClientBuilder) -> Self {
        self.transport_builder = Some(builder);
        self
    }

    /// Supplies a ready-made HTTP client, bypassing transport construction
    /// entirely.
    ///
    /// Takes precedence over [`transport_builder`](Self::transport_builder).
    #[must_use]
    pub fn call_factory(mut self, client: reqwest::Client) -> Self {
        self.call_factory = Some(client);
        self
    }

    /// Registers one of the auth schemes defined by the Petstore API.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownAuthScheme`] for undefined names and
    /// [`ConfigError::DuplicateAuthScheme`] when the name is taken.
    pub fn add_auth_scheme(mut self, name: &str) -> Result<Self, ConfigError> {
        let interceptor = AuthInterceptor::for_scheme(name)?;
        self.auth.insert(name, interceptor)?;
        Ok(self)
    }

    /// Registers an interceptor under a caller-chosen name.
    ///
    /// Interceptors run on every request in registration order.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::DuplicateAuthScheme`] when the name is taken.
    pub fn add_authorization(
        mut self,
        name: impl Into<String>,
        interceptor: AuthInterceptor,
    ) -> Result<Self, ConfigError> {
        self.auth.insert(name, interceptor)?;
        Ok(self)
    }

    /// Installs a callback receiving raw HTTP log lines.
    ///
    /// Lines cover the request method and URL, headers (credentials
    /// redacted), and bodies at full verbosity. The callback is only wired
    /// into the default transport; supplying a custom transport builder or
    /// call factory disables it.
    #[must_use]
    pub fn on_http_log(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log_callback = Some(Arc::new(callback));
        self
    }

    /// Sets the access token on the first registered OAuth scheme.
    ///
    /// Does nothing when no OAuth scheme is registered.
    #[must_use]
    pub fn set_access_token(self, access_token: impl Into<String>) -> Self {
        if let Some(oauth) = self.auth.first_oauth() {
            oauth.set_access_token(access_token);
        }
        self
    }

    /// Sets the key value on the first registered API key scheme.
    ///
    /// Does nothing when no API key scheme is registered.
    #[must_use]
    pub fn set_api_key(mut self, key: impl Into<String>) -> Self {
        if let Some(api_key) = self.auth.first_api_key_mut() {
            api_key.set_key(key);
        }
        self
    }

    /// Configures the browser authorization flow on the first registered
    /// OAuth scheme.
    ///
    /// Pipes the client ID and secret into the token endpoint and the
    /// client ID and redirect URI into the authorization endpoint. Does
    /// nothing when no OAuth scheme is registered.
    #[must_use]
    pub fn configure_authorization_flow(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        if let Some(oauth) = self.auth.first_oauth_mut() {
            let client_id = client_id.into();
            let redirect_uri = redirect_uri.into();
            oauth
                .token_endpoint_mut()
                .set_client_id(client_id.clone())
                .set_client_secret(client_secret)
                .set_redirect_uri(redirect_uri.clone());
            oauth
                .authorization_endpoint_mut()
                .set_client_id(client_id)
                .set_redirect_uri(redirect_uri);
        }
        self
    }

    /// Registers a callback invoked whenever a grant obtains a new access
    /// token, on the first registered OAuth scheme.
    ///
    /// Does nothing when no OAuth scheme is registered.
    #[must_use]
    pub fn on_access_token(
        mut self,
        listener: impl Fn(&OAuth2Token) + Send + Sync + 'static,
    ) -> Self {
        if let Some(oauth) = self.auth.first_oauth_mut() {
            oauth.on_access_token(listener);
        }
        self
    }

    /// Mutable handle to the first OAuth scheme's token endpoint.
    pub fn token_endpoint_mut(&mut self) -> Option<&mut TokenEndpoint> {
        self.auth
            .first_oauth_mut()
            .map(|oauth| oauth.token_endpoint_mut())
    }

    /// Mutable handle to the first OAuth scheme's authorization endpoint.
    pub fn authorization_endpoint_mut(&mut self) -> Option<&mut AuthorizationEndpoint> {
        self.auth
            .first_oauth_mut()
            .map(|oauth| oauth.authorization_endpoint_mut())
    }

    /// URL of the first OAuth scheme's token endpoint, if one is registered.
    pub fn oauth_token_url(&self) -> Option<&str> {
        self.auth
            .first_oauth()
            .map(|oauth| oauth.token_endpoint().url())
    }

    /// Rendered browser URL for the first OAuth scheme's redirect flow.
    ///
    /// Returns `Ok(None)` when no OAuth scheme is registered.
    ///
    /// ## Errors
    ///
    /// Fails when the flow has no browser step or the endpoint URL is
    /// missing or invalid.
    pub fn oauth_authorization_url(&self) -> Result<Option<String>, ApiError> {
        match self.auth.first_oauth() {
            Some(oauth) => Ok(Some(oauth.authorization_url()?)),
            None => Ok(None),
        }
    }

    /// Registered auth scheme names, in registration order.
    pub fn auth_names(&self) -> impl Iterator<Item = &str> {
        self.auth.names()
    }

    /// Builds the immutable [`ApiClient`].
    ///
    /// Transport resolution prefers the call factory, then the custom
    /// transport builder, then a default client with the configured
    /// timeout and a `petstore/<version>` user agent.
    ///
    /// ## Errors
    ///
    /// Returns an error when the base URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = Url::parse(&self.base_url).map_err(ConfigError::InvalidUrl)?;
        debug!(base_url = %base_url, auth_schemes = self.auth.len(), "building api client");

        let default_transport = self.call_factory.is_none() && self.transport_builder.is_none();
        let logger = match (self.log_callback, default_transport) {
            (Some(sink), true) => Some(HttpLogger::new(sink)),
            (Some(_), false) => {
                warn!("custom transport supplied; HTTP log callback will not be wired");
                None
            }
            (None, _) => None,
        };

        let http = match (self.call_factory, self.transport_builder) {
            (Some(client), _) => client,
            (None, Some(builder)) => builder.build().map_err(ClientError::Request)?,
            (None, None) => reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(self.timeout)
                .pool_max_idle_per_host(10)
                .build()
                .map_err(ClientError::Request)?,
        };

        Ok(ApiClient::from_inner(ClientInner {
            http,
            base_url,
            auth: self.auth,
            logger,
        }))
    }
}

impl std::fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("auth", &self.auth)
            .field("has_call_factory", &self.call_factory.is_some())
            .field("has_transport_builder", &self.transport_builder.is_some())
            .field("has_log_callback", &self.log_callback.is_some())
            .finish()
    }
}

/// Appends a trailing slash when absent so relative paths join correctly.
fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn normalizes_missing_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost/v2".to_string()),
            "http://localhost/v2/"
        );
        assert_eq!(
            normalize_base_url("http://localhost/v2/".to_string()),
            "http://localhost/v2/"
        );
    }

    #[test]
    #[serial]
    fn default_base_url_points_at_public_server() {
        std::env::remove_var(SERVER_URL_ENV);
        let client = ApiClientBuilder::new().build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://petstore.swagger.io/v2/");
    }

    #[test]
    #[serial]
    fn env_var_overrides_default_base_url() {
        std::env::set_var(SERVER_URL_ENV, "http://localhost:9999/api");
        let client = ApiClientBuilder::new().build().unwrap();
        // Normalization applies to the env value too
        assert_eq!(client.base_url().as_str(), "http://localhost:9999/api/");
        std::env::remove_var(SERVER_URL_ENV);
    }

    #[test]
    fn base_url_setter_normalizes() {
        let client = ApiClientBuilder::new()
            .base_url("http://localhost:1234/v2")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:1234/v2/");
    }

    #[test]
    fn unknown_scheme_fails_fast() {
        let err = ApiClientBuilder::with_auth_schemes(["nope"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAuthScheme { name } if name == "nope"));
    }

    #[test]
    fn duplicate_scheme_fails_fast() {
        let err = ApiClientBuilder::with_auth_schemes(["api_key", "api_key"]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAuthScheme { name } if name == "api_key"));
    }

    #[test]
    fn scheme_order_is_preserved() {
        let builder =
            ApiClientBuilder::with_auth_schemes(["petstore_auth", "api_key"]).unwrap();
        let names: Vec<&str> = builder.auth_names().collect();
        assert_eq!(names, ["petstore_auth", "api_key"]);
    }

    #[test]
    fn oauth_accessors_are_none_without_oauth() {
        let mut builder = ApiClientBuilder::with_auth_schemes(["api_key"]).unwrap();
        assert!(builder.oauth_token_url().is_none());
        assert!(builder.oauth_authorization_url().unwrap().is_none());
        assert!(builder.token_endpoint_mut().is_none());
        assert!(builder.authorization_endpoint_mut().is_none());
    }

    #[test]
    fn oauth_helpers_are_no_ops_without_oauth() {
        // Must not panic or register anything
        let builder = ApiClientBuilder::with_auth_schemes(["api_key"])
            .unwrap()
            .set_access_token("ignored")
            .on_access_token(|_| {})
            .configure_authorization_flow("id", "secret", "http://cb");
        assert_eq!(builder.auth_names().count(), 1);
    }

    #[test]
    fn oauth_accessors_find_oauth_behind_other_schemes() {
        let mut builder = ApiClientBuilder::with_auth_schemes(["api_key", "petstore_auth"])
            .unwrap()
            .set_access_token("tok");

        assert!(builder.token_endpoint_mut().is_some());
        let held = builder.auth.first_oauth().unwrap().access_token().unwrap();
        assert_eq!(held, "tok");
    }

    #[test]
    fn configure_authorization_flow_pipes_both_endpoints() {
        let mut builder = ApiClientBuilder::with_auth_schemes(["petstore_auth"])
            .unwrap()
            .configure_authorization_flow("my-app", "my-secret", "http://localhost/cb");

        let url = builder.oauth_authorization_url().unwrap().unwrap();
        assert!(url.contains("client_id=my-app"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%2Fcb"));
        assert!(url.contains("response_type=token"));

        // Token endpoint saw the same client credentials
        let te = builder.token_endpoint_mut().unwrap();
        assert!(te.has_grant_credentials(crate::auth::OAuthFlow::Application));
    }

    #[test]
    fn with_oauth_credentials_enables_password_grant() {
        let mut builder =
            ApiClientBuilder::with_oauth_credentials("id", "secret", "bob", "hunter2").unwrap();
        let names: Vec<&str> = builder.auth_names().collect();
        assert_eq!(names, ["petstore_auth"]);

        let oauth = builder.auth.first_oauth().unwrap();
        assert_eq!(oauth.flow(), OAuthFlow::Password);
        let te = builder.token_endpoint_mut().unwrap();
        assert!(te.has_grant_credentials(OAuthFlow::Password));
    }

    #[test]
    fn builder_debug_hides_callback_internals() {
        let builder = ApiClientBuilder::new().on_http_log(|_| {});
        let rendered = format!("{builder:?}");
        assert!(rendered.contains("has_log_callback: true"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn warns_when_log_callback_cannot_be_wired() {
        let client = ApiClientBuilder::new()
            .base_url("http://localhost:9999")
            .transport_builder(reqwest::ClientBuilder::new())
            .on_http_log(|_| {})
            .build()
            .unwrap();
        drop(client);

        assert!(logs_contain(
            "custom transport supplied; HTTP log callback will not be wired"
        ));
    }
}
