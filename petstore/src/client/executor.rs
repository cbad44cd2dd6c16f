//! Request execution with tracing instrumentation.
//!
//! [`ApiClient`] is the immutable, cheaply cloneable product of
//! [`ApiClientBuilder`](crate::client::ApiClientBuilder). Each operation
//! goes through an [`ApiCall`], which collects path, query, header, and
//! body inputs, applies every registered auth scheme in order, and decodes
//! the response with the endpoint's format.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use reqwest::header::ACCEPT;
use reqwest::{Request, RequestBuilder, StatusCode};
use tracing::{debug, instrument, warn, Span};
use url::Url;

use crate::apis::{CollectionFormat, Service};
use crate::auth::{AuthRegistry, OAuth};
use crate::client::logging::HttpLogger;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
use crate::response::ResponseFormat;

/// Frozen client state shared by every clone and service.
#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) auth: AuthRegistry,
    pub(crate) logger: Option<HttpLogger>,
}

/// Async HTTP client for the Petstore API.
///
/// Clones share one connection pool, one auth registry, and one token
/// cell, so a token refreshed through any handle is used by all of them.
/// Typed service clients are obtained through [`service`](Self::service).
///
/// ## Examples
///
/// ```rust,ignore
/// use petstore::client::ApiClient;
/// use petstore::apis::PetApi;
///
/// let client = ApiClient::builder().build()?;
/// let pets: PetApi = client.service();
/// let pet = pets.get_pet_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder() -> crate::client::ApiClientBuilder {
        crate::client::ApiClientBuilder::new()
    }

    pub(crate) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Registered auth scheme names, in registration order.
    pub fn auth_names(&self) -> impl Iterator<Item = &str> {
        self.inner.auth.names()
    }

    /// The first registered OAuth scheme, if any.
    ///
    /// Useful for priming a token before the first request or inspecting
    /// the held token after a refresh.
    pub fn oauth(&self) -> Option<&OAuth> {
        self.inner.auth.first_oauth()
    }

    /// Replaces the access token on the first registered OAuth scheme.
    ///
    /// Visible to every clone of this client immediately. Does nothing
    /// when no OAuth scheme is registered.
    pub fn set_access_token(&self, access_token: impl Into<String>) {
        if let Some(oauth) = self.inner.auth.first_oauth() {
            oauth.set_access_token(access_token);
        }
    }

    /// Produces a typed service client backed by this client.
    ///
    /// May be called repeatedly and concurrently; each call returns a
    /// fresh service sharing this client's state.
    pub fn service<S: Service>(&self) -> S {
        S::from_client(self.clone())
    }

    /// Starts a call to the given endpoint.
    pub fn request<F: ResponseFormat>(&self, endpoint: Endpoint<F>) -> ApiCall<'_, F> {
        ApiCall::new(self, endpoint)
    }
}

/// Request body payload for one call.
enum BodySpec {
    None,
    Json(String),
    Form(Vec<(String, String)>),
    // Taken on first build; multipart bodies cannot be rebuilt for a retry
    Multipart(Option<reqwest::multipart::Form>),
}

/// One in-flight API call under construction.
///
/// Obtained from [`ApiClient::request`]. Builder methods collect the
/// operation's inputs; [`send`](Self::send) executes the call.
pub struct ApiCall<'c, F: ResponseFormat> {
    client: &'c ApiClient,
    endpoint: Endpoint<F>,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(&'static str, String)>,
    body: BodySpec,
}

impl<'c, F: ResponseFormat> ApiCall<'c, F> {
    fn new(client: &'c ApiClient, endpoint: Endpoint<F>) -> Self {
        Self {
            client,
            endpoint,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: BodySpec::None,
        }
    }

    /// Substitutes a `{name}` placeholder in the endpoint path.
    #[must_use]
    pub fn path_param(mut self, name: &'static str, value: impl Display) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    /// Appends one query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Appends a multi-valued query parameter using the given collection
    /// format.
    ///
    /// Joined formats produce a single pair; [`CollectionFormat::Multi`]
    /// produces one pair per value. Nothing is appended when `values` is
    /// empty.
    #[must_use]
    pub fn query_values<I>(
        mut self,
        name: impl Into<String>,
        values: I,
        format: CollectionFormat,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let name = name.into();
        let rendered: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if rendered.is_empty() {
            return self;
        }
        match format.separator() {
            Some(separator) => self.query.push((name, rendered.join(separator))),
            None => {
                for value in rendered {
                    self.query.push((name.clone(), value));
                }
            }
        }
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Attaches a JSON request body.
    ///
    /// ## Errors
    ///
    /// Returns a validation error when the body cannot be serialized.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let json = serde_json::to_string(body).map_err(ValidationError::JsonEncode)?;
        self.body = BodySpec::Json(json);
        Ok(self)
    }

    /// Attaches a form-urlencoded request body.
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = BodySpec::Form(
            fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        );
        self
    }

    /// Attaches a multipart form body.
    ///
    /// Multipart bodies cannot be replayed, so a call carrying one is
    /// never retried after a token refresh.
    #[must_use]
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = BodySpec::Multipart(Some(form));
        self
    }

    /// Executes the call and decodes the response.
    ///
    /// Every registered auth scheme is applied in registration order. A
    /// 401 response triggers one retry with a freshly obtained token when
    /// the first OAuth scheme has the means to get one; the refreshed
    /// token is stored for subsequent calls.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails at the transport level, the
    /// server answers with a non-success status, or the body cannot be
    /// decoded.
    #[instrument(
        name = "api_request",
        skip(self),
        fields(
            operation = self.endpoint.id(),
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn send(mut self) -> Result<F::Output, ApiError> {
        let client = self.client;
        Span::current().record("http.method", self.endpoint.method().as_str());

        let path_params: Vec<(&str, &str)> = self
            .path_params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        let mut url = self
            .endpoint
            .url(client.base_url(), &path_params)
            .map_err(ConfigError::InvalidUrl)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }
        Span::current().record("http.url", url.as_str());

        let request = self.build_request(&url)?;
        self.log_request(&request);
        let mut started = Instant::now();
        let mut response = client
            .inner
            .http
            .execute(request)
            .await
            .map_err(ClientError::Request)?;

        if response.status() == StatusCode::UNAUTHORIZED && self.can_rebuild() {
            if let Some(oauth) = client.inner.auth.first_oauth() {
                if oauth.can_refresh() {
                    match oauth.obtain_fresh_token(&client.inner.http).await {
                        Ok(_) => {
                            debug!(operation = self.endpoint.id(), "retrying with fresh token");
                            // The discarded 401 response still gets its log line.
                            if let Some(logger) = &client.inner.logger {
                                let status = response.status();
                                let body = response.bytes().await.unwrap_or_default();
                                logger.response(status, &url, started.elapsed(), &body);
                            }
                            let retry = self.build_request(&url)?;
                            self.log_request(&retry);
                            started = Instant::now();
                            response = client
                                .inner
                                .http
                                .execute(retry)
                                .await
                                .map_err(ClientError::Request)?;
                        }
                        Err(error) => {
                            warn!(%error, "token refresh failed, surfacing original 401");
                        }
                    }
                }
            }
        }

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.bytes().await.map_err(ClientError::Request)?;
        if let Some(logger) = &client.inner.logger {
            logger.response(status, &url, started.elapsed(), &body);
        }

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).into_owned();
            if status == StatusCode::UNAUTHORIZED {
                return Err(AuthError::AuthenticationFailed { message }.into());
            }
            if status == StatusCode::FORBIDDEN {
                return Err(AuthError::InsufficientPermissions {
                    operation: self.endpoint.id().to_string(),
                }
                .into());
            }
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed = F::parse(body).await.map_err(ApiError::Validation)?;
        Ok(parsed)
    }

    /// Builds the concrete request, applying auth in registration order.
    fn build_request(&mut self, url: &Url) -> Result<Request, ApiError> {
        let client = self.client;
        let mut builder: RequestBuilder = client
            .inner
            .http
            .request(self.endpoint.method(), url.clone())
            .header(ACCEPT, F::content_type());

        for (name, value) in &self.headers {
            builder = builder.header(*name, value);
        }

        builder = match &mut self.body {
            BodySpec::None => builder,
            BodySpec::Json(json) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json.clone()),
            BodySpec::Form(fields) => builder.form(fields),
            BodySpec::Multipart(form) => match form.take() {
                Some(form) => builder.multipart(form),
                None => builder,
            },
        };

        builder = client.inner.auth.apply_all(builder);
        Ok(builder.build().map_err(ClientError::Request)?)
    }

    /// Whether the request body can be built a second time.
    fn can_rebuild(&self) -> bool {
        !matches!(self.body, BodySpec::Multipart(None))
    }

    fn log_request(&self, request: &Request) {
        if let Some(logger) = &self.client.inner.logger {
            logger.request(request, self.body_preview().as_deref());
        }
    }

    /// Renders the body the way it goes over the wire, for logging.
    fn body_preview(&self) -> Option<String> {
        match &self.body {
            BodySpec::None => None,
            BodySpec::Json(json) => Some(json.clone()),
            BodySpec::Form(fields) => Some(
                fields
                    .iter()
                    .map(|(name, value)| {
                        format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                    })
                    .collect::<Vec<_>>()
                    .join("&"),
            ),
            BodySpec::Multipart(_) => Some("(binary multipart body omitted)".to_string()),
        }
    }
}
