//! OAuth 2.0 authentication.
//!
//! The Petstore `petstore_auth` scheme is an implicit-flow OAuth scheme, but
//! this module supports all four classic flows. [`OAuth`] holds the current
//! token behind a shared cell, so a token set or refreshed after the client
//! is built is visible to every clone of the client.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use reqwest::RequestBuilder;
use serde::Deserialize;
use strum::{Display, EnumString};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, AuthError, ConfigError};

/// Seconds before the recorded expiry at which a token counts as stale.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Callback invoked whenever a new access token is obtained.
pub type AccessTokenListener = Arc<dyn Fn(&OAuth2Token) + Send + Sync>;

/// The OAuth 2.0 grant flow a scheme is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OAuthFlow {
    /// Authorization-code flow (browser redirect, then code exchange).
    AccessCode,
    /// Implicit flow (browser redirect returns the token directly).
    Implicit,
    /// Resource-owner-password flow.
    Password,
    /// Client-credentials flow.
    Application,
}

/// An OAuth 2.0 access token with its associated metadata.
#[derive(Clone, PartialEq)]
pub struct OAuth2Token {
    /// The bearer token value.
    pub access_token: String,
    /// Token type reported by the server, normally `Bearer`.
    pub token_type: String,
    /// Absolute expiry time, when the server reported one.
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token, when the grant issued one.
    pub refresh_token: Option<String>,
    /// Scopes granted, as reported by the server.
    pub scope: Option<String>,
}

impl OAuth2Token {
    /// Creates a bearer token with no expiry metadata.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_at: None,
            refresh_token: None,
            scope: None,
        }
    }

    /// Returns `true` if the token's recorded expiry has passed.
    ///
    /// Tokens without expiry metadata never count as expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() >= at,
            None => false,
        }
    }

    /// Returns `true` if the token expires within the staleness buffer.
    pub fn will_expire_soon(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() + Duration::seconds(EXPIRY_BUFFER_SECS) >= at,
            None => false,
        }
    }

    fn from_response(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response
                .token_type
                .unwrap_or_else(|| "Bearer".to_string()),
            // An out-of-range expires_in counts as no expiry.
            expires_at: response
                .expires_in
                .and_then(Duration::try_seconds)
                .and_then(|delta| Utc::now().checked_add_signed(delta)),
            refresh_token: response.refresh_token,
            scope: response.scope,
        }
    }
}

impl std::fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Wire format of a token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Configuration for the OAuth token endpoint.
///
/// Holds the endpoint URL plus whatever credentials the configured flow
/// needs. Setters return `&mut Self` so a mutable handle can be chained:
///
/// ```rust,ignore
/// if let Some(te) = builder.token_endpoint_mut() {
///     te.set_client_id("app").set_username("bob").set_password("pw");
/// }
/// ```
#[derive(Clone, Default)]
pub struct TokenEndpoint {
    url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    username: Option<String>,
    password: Option<String>,
    code: Option<String>,
    redirect_uri: Option<String>,
    scopes: Vec<String>,
}

impl TokenEndpoint {
    /// Creates a token endpoint configuration for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the token endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the configured scopes.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Sets the token endpoint URL.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    /// Sets the OAuth client ID.
    pub fn set_client_id(&mut self, client_id: impl Into<String>) -> &mut Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the OAuth client secret.
    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) -> &mut Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the resource-owner username for the password flow.
    pub fn set_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the resource-owner password for the password flow.
    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the authorization code for the access-code flow.
    pub fn set_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the redirect URI used during code exchange.
    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) -> &mut Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Replaces the scope list.
    pub fn set_scopes(&mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if this configuration can run the given flow's grant
    /// without a browser round trip.
    pub(crate) fn has_grant_credentials(&self, flow: OAuthFlow) -> bool {
        match flow {
            OAuthFlow::Password => self.username.is_some() && self.password.is_some(),
            OAuthFlow::Application => self.client_id.is_some() && self.client_secret.is_some(),
            OAuthFlow::AccessCode => self.code.is_some(),
            OAuthFlow::Implicit => false,
        }
    }

    /// Requests a fresh token by running the grant for `flow`.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::UnsupportedFlow`] for the implicit flow, which
    /// can only obtain tokens through a browser redirect, and
    /// [`AuthError::MissingCredential`] when the flow's inputs are not set.
    pub async fn request_token(
        &self,
        http: &reqwest::Client,
        flow: OAuthFlow,
    ) -> Result<OAuth2Token, AuthError> {
        let scope = self.scopes.join(" ");
        let mut params: Vec<(&str, &str)> = Vec::new();

        match flow {
            OAuthFlow::Password => {
                let username = self.username.as_deref().ok_or(AuthError::MissingCredential {
                    field: "username",
                })?;
                let password = self.password.as_deref().ok_or(AuthError::MissingCredential {
                    field: "password",
                })?;
                params.push(("grant_type", "password"));
                params.push(("username", username));
                params.push(("password", password));
            }
            OAuthFlow::Application => {
                if self.client_id.is_none() {
                    return Err(AuthError::MissingCredential { field: "client_id" });
                }
                if self.client_secret.is_none() {
                    return Err(AuthError::MissingCredential {
                        field: "client_secret",
                    });
                }
                params.push(("grant_type", "client_credentials"));
            }
            OAuthFlow::AccessCode => {
                let code = self
                    .code
                    .as_deref()
                    .ok_or(AuthError::MissingCredential { field: "code" })?;
                params.push(("grant_type", "authorization_code"));
                params.push(("code", code));
                if let Some(redirect_uri) = self.redirect_uri.as_deref() {
                    params.push(("redirect_uri", redirect_uri));
                }
            }
            OAuthFlow::Implicit => {
                return Err(AuthError::UnsupportedFlow { flow });
            }
        }

        if let Some(client_id) = self.client_id.as_deref() {
            params.push(("client_id", client_id));
        }
        if let Some(client_secret) = self.client_secret.as_deref() {
            params.push(("client_secret", client_secret));
        }
        if !scope.is_empty() {
            params.push(("scope", &scope));
        }

        debug!(flow = %flow, url = %self.url, "requesting OAuth token");
        self.post_grant(http, &params).await
    }

    /// Exchanges a refresh token for a fresh access token.
    pub async fn refresh(
        &self,
        http: &reqwest::Client,
        refresh_token: &str,
    ) -> Result<OAuth2Token, AuthError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        if let Some(client_id) = self.client_id.as_deref() {
            params.push(("client_id", client_id));
        }
        if let Some(client_secret) = self.client_secret.as_deref() {
            params.push(("client_secret", client_secret));
        }

        debug!(url = %self.url, "refreshing OAuth token");
        self.post_grant(http, &params).await
    }

    async fn post_grant(
        &self,
        http: &reqwest::Client,
        params: &[(&str, &str)],
    ) -> Result<OAuth2Token, AuthError> {
        if self.url.is_empty() {
            return Err(AuthError::MissingCredential { field: "token_url" });
        }

        let response = http
            .post(&self.url)
            .form(params)
            .send()
            .await
            .map_err(AuthError::TokenRequest)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            warn!(status = status.as_u16(), "token endpoint rejected grant");
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await.map_err(AuthError::TokenRequest)?;
        Ok(OAuth2Token::from_response(token))
    }
}

impl std::fmt::Debug for TokenEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEndpoint")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Configuration for the OAuth authorization (browser redirect) endpoint.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationEndpoint {
    url: String,
    client_id: Option<String>,
    redirect_uri: Option<String>,
    state: Option<String>,
    scopes: Vec<String>,
}

impl AuthorizationEndpoint {
    /// Creates an authorization endpoint configuration for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the authorization endpoint URL without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sets the OAuth client ID.
    pub fn set_client_id(&mut self, client_id: impl Into<String>) -> &mut Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the redirect URI the browser returns to.
    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) -> &mut Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Sets the opaque state value round-tripped through the redirect.
    pub fn set_state(&mut self, state: impl Into<String>) -> &mut Self {
        self.state = Some(state.into());
        self
    }

    /// Replaces the scope list.
    pub fn set_scopes(&mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Renders the URL to send a browser to, with the given response type.
    ///
    /// ## Errors
    ///
    /// Returns an error when no endpoint URL is configured or the URL does
    /// not parse.
    pub fn authorize_url(&self, response_type: &str) -> Result<String, ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::missing_field("authorization_url"));
        }

        let mut url = Url::parse(&self.url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("response_type", response_type);
            if let Some(client_id) = &self.client_id {
                pairs.append_pair("client_id", client_id);
            }
            if let Some(redirect_uri) = &self.redirect_uri {
                pairs.append_pair("redirect_uri", redirect_uri);
            }
            if !self.scopes.is_empty() {
                pairs.append_pair("scope", &self.scopes.join(" "));
            }
            if let Some(state) = &self.state {
                pairs.append_pair("state", state);
            }
        }
        Ok(url.into())
    }
}

/// OAuth 2.0 authentication for one registered scheme.
///
/// Attaches `Authorization: Bearer <token>` to outgoing requests once a
/// token is held. The token lives behind a shared cell: rotating it through
/// any handle is observed by every request issued afterwards.
pub struct OAuth {
    flow: OAuthFlow,
    token_endpoint: TokenEndpoint,
    authorization_endpoint: AuthorizationEndpoint,
    token: Arc<RwLock<Option<OAuth2Token>>>,
    listener: Option<AccessTokenListener>,
}

impl OAuth {
    /// Creates an OAuth scheme for the given flow and endpoints.
    pub fn new(
        flow: OAuthFlow,
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let scopes: Vec<String> = scopes.into_iter().map(Into::into).collect();
        let mut token_endpoint = TokenEndpoint::new(token_url);
        token_endpoint.set_scopes(scopes.clone());
        let mut authorization_endpoint = AuthorizationEndpoint::new(authorization_url);
        authorization_endpoint.set_scopes(scopes);

        Self {
            flow,
            token_endpoint,
            authorization_endpoint,
            token: Arc::new(RwLock::new(None)),
            listener: None,
        }
    }

    /// Creates an implicit-flow scheme, which has no token endpoint.
    pub fn implicit(
        authorization_url: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(OAuthFlow::Implicit, authorization_url, "", scopes)
    }

    /// Returns the configured flow.
    pub fn flow(&self) -> OAuthFlow {
        self.flow
    }

    /// Switches the grant flow used for token requests.
    pub fn set_flow(&mut self, flow: OAuthFlow) -> &mut Self {
        self.flow = flow;
        self
    }

    /// Returns the token endpoint configuration.
    pub fn token_endpoint(&self) -> &TokenEndpoint {
        &self.token_endpoint
    }

    /// Returns a mutable handle to the token endpoint configuration.
    pub fn token_endpoint_mut(&mut self) -> &mut TokenEndpoint {
        &mut self.token_endpoint
    }

    /// Returns the authorization endpoint configuration.
    pub fn authorization_endpoint(&self) -> &AuthorizationEndpoint {
        &self.authorization_endpoint
    }

    /// Returns a mutable handle to the authorization endpoint configuration.
    pub fn authorization_endpoint_mut(&mut self) -> &mut AuthorizationEndpoint {
        &mut self.authorization_endpoint
    }

    /// Renders the browser URL that starts this scheme's redirect flow.
    ///
    /// The response type follows the flow: `token` for implicit, `code` for
    /// access-code.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::UnsupportedFlow`] for flows without a browser
    /// step, or a config error when the endpoint URL is missing or invalid.
    pub fn authorization_url(&self) -> Result<String, ApiError> {
        let response_type = match self.flow {
            OAuthFlow::Implicit => "token",
            OAuthFlow::AccessCode => "code",
            flow => return Err(AuthError::UnsupportedFlow { flow }.into()),
        };
        Ok(self.authorization_endpoint.authorize_url(response_type)?)
    }

    /// Replaces the held access token value.
    ///
    /// Metadata from a previously obtained token (refresh token, scopes) is
    /// kept, so rotating the bearer value does not forget how to refresh.
    /// The access-token listener is not invoked for manual updates.
    pub fn set_access_token(&self, access_token: impl Into<String>) {
        let access_token = access_token.into();
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(token) => token.access_token = access_token,
            None => *guard = Some(OAuth2Token::bearer(access_token)),
        }
    }

    /// Returns the current access token value, if one is held.
    pub fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Returns a copy of the currently held token, if any.
    pub fn current_token(&self) -> Option<OAuth2Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registers a callback invoked whenever a grant obtains a new token.
    pub fn on_access_token(&mut self, listener: impl Fn(&OAuth2Token) + Send + Sync + 'static) {
        self.listener = Some(Arc::new(listener));
    }

    /// Attaches the held token to an outgoing request as a bearer header.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Returns `true` if a 401 response could be recovered by obtaining a
    /// fresh token without user interaction.
    pub(crate) fn can_refresh(&self) -> bool {
        let has_refresh_token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|t| t.refresh_token.is_some());
        has_refresh_token || self.token_endpoint.has_grant_credentials(self.flow)
    }

    /// Obtains a fresh token, stores it, and notifies the listener.
    ///
    /// Prefers the refresh grant when a refresh token is held, falling back
    /// to re-running the configured flow's grant.
    pub(crate) async fn obtain_fresh_token(
        &self,
        http: &reqwest::Client,
    ) -> Result<OAuth2Token, AuthError> {
        let refresh_token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|t| t.refresh_token.clone());

        let fresh = match refresh_token {
            Some(refresh_token) => {
                self.token_endpoint.refresh(http, &refresh_token).await?
            }
            None => self.token_endpoint.request_token(http, self.flow).await?,
        };

        self.store_token(fresh.clone());
        Ok(fresh)
    }

    /// Runs the configured grant immediately and stores the result.
    ///
    /// Useful for priming a password-flow or client-credentials client
    /// before its first request.
    pub async fn request_token(&self, http: &reqwest::Client) -> Result<OAuth2Token, AuthError> {
        let fresh = self.token_endpoint.request_token(http, self.flow).await?;
        self.store_token(fresh.clone());
        Ok(fresh)
    }

    fn store_token(&self, token: OAuth2Token) {
        {
            let mut guard = self
                .token
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some(token.clone());
        }
        if let Some(listener) = &self.listener {
            listener(&token);
        }
    }
}

impl std::fmt::Debug for OAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let has_token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("OAuth")
            .field("flow", &self.flow)
            .field("token_endpoint", &self.token_endpoint)
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("has_token", &has_token)
            .finish_non_exhaustive()
    }
}
