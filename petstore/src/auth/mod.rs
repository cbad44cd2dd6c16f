//! Authentication schemes and the per-client auth registry.
//!
//! The Petstore API defines two named schemes: `petstore_auth`, an
//! implicit-flow OAuth scheme, and `api_key`, a header-placed API key.
//! [`AuthInterceptor::for_scheme`] maps those names to ready-made
//! interceptors; callers can also register their own under any free name.
//!
//! Registered interceptors are applied to every outgoing request in
//! registration order.

mod api_key;
mod basic;
mod oauth;

pub use api_key::{ApiKeyAuth, KeyLocation};
pub use basic::HttpBasicAuth;
pub use oauth::{
    AccessTokenListener, AuthorizationEndpoint, OAuth, OAuth2Token, OAuthFlow, TokenEndpoint,
};

use reqwest::RequestBuilder;

use crate::error::ConfigError;

/// Authorization dialog URL for the `petstore_auth` scheme.
const PETSTORE_AUTH_DIALOG_URL: &str = "http://petstore.swagger.io/api/oauth/dialog";

/// Scopes granted through the `petstore_auth` dialog.
const PETSTORE_AUTH_SCOPES: [&str; 2] = ["write:pets", "read:pets"];

/// Header name used by the `api_key` scheme.
const API_KEY_HEADER: &str = "api_key";

/// A user-supplied authentication step.
///
/// Implement this to register auth logic the built-in schemes do not cover,
/// such as request signing or proprietary headers.
pub trait Interceptor: Send + Sync {
    /// Attaches this interceptor's credentials to an outgoing request.
    fn apply(&self, request: RequestBuilder) -> RequestBuilder;
}

/// One registered authentication scheme.
///
/// The variants cover the schemes the Petstore API defines plus HTTP Basic
/// and an escape hatch for caller-defined interceptors. Keeping the set
/// closed lets the client scan for specific kinds: the OAuth helpers on
/// the builder operate on the first [`AuthInterceptor::OAuth`] entry
/// without any downcasting.
pub enum AuthInterceptor {
    /// OAuth 2.0 bearer tokens.
    OAuth(OAuth),
    /// Named API key in a header or query parameter.
    ApiKey(ApiKeyAuth),
    /// HTTP Basic credentials.
    Basic(HttpBasicAuth),
    /// Caller-defined interceptor.
    Custom(Box<dyn Interceptor>),
}

impl AuthInterceptor {
    /// Builds the interceptor for a scheme name defined by the Petstore API.
    ///
    /// | Name            | Scheme                                        |
    /// |-----------------|-----------------------------------------------|
    /// | `petstore_auth` | implicit-flow OAuth via the petstore dialog   |
    /// | `api_key`       | `api_key` header                              |
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownAuthScheme`] for any other name.
    pub fn for_scheme(name: &str) -> Result<Self, ConfigError> {
        match name {
            "petstore_auth" => Ok(Self::OAuth(OAuth::implicit(
                PETSTORE_AUTH_DIALOG_URL,
                PETSTORE_AUTH_SCOPES,
            ))),
            "api_key" => Ok(Self::ApiKey(ApiKeyAuth::header(API_KEY_HEADER))),
            other => Err(ConfigError::unknown_scheme(other)),
        }
    }

    /// Returns the OAuth scheme if this is an OAuth interceptor.
    pub fn as_oauth(&self) -> Option<&OAuth> {
        match self {
            Self::OAuth(oauth) => Some(oauth),
            _ => None,
        }
    }

    /// Returns the OAuth scheme mutably if this is an OAuth interceptor.
    pub fn as_oauth_mut(&mut self) -> Option<&mut OAuth> {
        match self {
            Self::OAuth(oauth) => Some(oauth),
            _ => None,
        }
    }

    /// Returns the API key scheme mutably if this is an API key interceptor.
    pub fn as_api_key_mut(&mut self) -> Option<&mut ApiKeyAuth> {
        match self {
            Self::ApiKey(api_key) => Some(api_key),
            _ => None,
        }
    }

    /// Attaches this scheme's credentials to an outgoing request.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::OAuth(oauth) => oauth.apply(request),
            Self::ApiKey(api_key) => api_key.apply(request),
            Self::Basic(basic) => basic.apply(request),
            Self::Custom(custom) => custom.apply(request),
        }
    }
}

impl std::fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OAuth(oauth) => f.debug_tuple("OAuth").field(oauth).finish(),
            Self::ApiKey(api_key) => f.debug_tuple("ApiKey").field(api_key).finish(),
            Self::Basic(basic) => f.debug_tuple("Basic").field(basic).finish(),
            Self::Custom(_) => f.debug_struct("Custom").finish_non_exhaustive(),
        }
    }
}

/// Ordered collection of named authentication schemes.
///
/// Names are unique; application order is registration order.
#[derive(Debug, Default)]
pub(crate) struct AuthRegistry {
    entries: Vec<(String, AuthInterceptor)>,
}

impl AuthRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers an interceptor under a unique name.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::DuplicateAuthScheme`] when the name is taken;
    /// the registry is left unchanged.
    pub(crate) fn insert(
        &mut self,
        name: impl Into<String>,
        interceptor: AuthInterceptor,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.entries.iter().any(|(existing, _)| *existing == name) {
            return Err(ConfigError::duplicate_scheme(name));
        }
        self.entries.push((name, interceptor));
        Ok(())
    }

    /// Registered scheme names, in registration order.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// The first registered OAuth scheme, if any.
    pub(crate) fn first_oauth(&self) -> Option<&OAuth> {
        self.entries
            .iter()
            .find_map(|(_, interceptor)| interceptor.as_oauth())
    }

    /// The first registered OAuth scheme, mutably.
    pub(crate) fn first_oauth_mut(&mut self) -> Option<&mut OAuth> {
        self.entries
            .iter_mut()
            .find_map(|(_, interceptor)| interceptor.as_oauth_mut())
    }

    /// The first registered API key scheme, mutably.
    pub(crate) fn first_api_key_mut(&mut self) -> Option<&mut ApiKeyAuth> {
        self.entries
            .iter_mut()
            .find_map(|(_, interceptor)| interceptor.as_api_key_mut())
    }

    /// Applies every registered scheme to a request, in registration order.
    pub(crate) fn apply_all(&self, request: RequestBuilder) -> RequestBuilder {
        self.entries
            .iter()
            .fold(request, |request, (_, interceptor)| {
                interceptor.apply(request)
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TagHeader(&'static str);

    impl Interceptor for TagHeader {
        fn apply(&self, request: RequestBuilder) -> RequestBuilder {
            request.header("x-order", self.0)
        }
    }

    #[test]
    fn petstore_auth_maps_to_implicit_oauth() {
        let interceptor = AuthInterceptor::for_scheme("petstore_auth").unwrap();
        let oauth = interceptor.as_oauth().unwrap();
        assert_eq!(oauth.flow(), OAuthFlow::Implicit);
        assert_eq!(
            oauth.authorization_endpoint().url(),
            "http://petstore.swagger.io/api/oauth/dialog"
        );
        assert_eq!(
            oauth.token_endpoint().scopes(),
            ["write:pets".to_string(), "read:pets".to_string()]
        );
    }

    #[test]
    fn api_key_maps_to_header_scheme() {
        let mut interceptor = AuthInterceptor::for_scheme("api_key").unwrap();
        let api_key = interceptor.as_api_key_mut().unwrap();
        assert_eq!(api_key.param_name(), "api_key");
        assert_eq!(api_key.location(), KeyLocation::Header);
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = AuthInterceptor::for_scheme("petstore_oauth").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAuthScheme { name } if name == "petstore_oauth"));
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry = AuthRegistry::new();
        registry
            .insert("api_key", AuthInterceptor::for_scheme("api_key").unwrap())
            .unwrap();
        registry
            .insert(
                "petstore_auth",
                AuthInterceptor::for_scheme("petstore_auth").unwrap(),
            )
            .unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["api_key", "petstore_auth"]);
    }

    #[test]
    fn duplicate_name_is_rejected_and_registry_unchanged() {
        let mut registry = AuthRegistry::new();
        registry
            .insert("api_key", AuthInterceptor::for_scheme("api_key").unwrap())
            .unwrap();

        let err = registry
            .insert("api_key", AuthInterceptor::for_scheme("api_key").unwrap())
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAuthScheme { name } if name == "api_key"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn first_oauth_skips_other_schemes() {
        let mut registry = AuthRegistry::new();
        registry
            .insert("api_key", AuthInterceptor::for_scheme("api_key").unwrap())
            .unwrap();
        registry
            .insert(
                "petstore_auth",
                AuthInterceptor::for_scheme("petstore_auth").unwrap(),
            )
            .unwrap();
        registry
            .insert(
                "second_oauth",
                AuthInterceptor::OAuth(OAuth::implicit("http://localhost/other", ["read"])),
            )
            .unwrap();

        let first = registry.first_oauth().unwrap();
        assert_eq!(
            first.authorization_endpoint().url(),
            "http://petstore.swagger.io/api/oauth/dialog"
        );
    }

    #[test]
    fn no_oauth_registered_yields_none() {
        let mut registry = AuthRegistry::new();
        registry
            .insert("api_key", AuthInterceptor::for_scheme("api_key").unwrap())
            .unwrap();
        assert!(registry.first_oauth().is_none());
        assert!(registry.first_oauth_mut().is_none());
    }

    #[test]
    fn basic_scheme_applies_through_registry() {
        let mut registry = AuthRegistry::new();
        registry
            .insert(
                "internal_basic",
                AuthInterceptor::Basic(HttpBasicAuth::with_credentials("alice", "s3cret")),
            )
            .unwrap();

        let http = reqwest::Client::new();
        let req = registry
            .apply_all(http.get("http://localhost/"))
            .build()
            .unwrap();
        let value = req.headers().get("authorization").unwrap().to_str().unwrap();
        assert!(value.starts_with("Basic "));
    }

    #[test]
    fn apply_all_runs_in_registration_order() {
        let mut registry = AuthRegistry::new();
        registry
            .insert("first", AuthInterceptor::Custom(Box::new(TagHeader("a"))))
            .unwrap();
        registry
            .insert("second", AuthInterceptor::Custom(Box::new(TagHeader("b"))))
            .unwrap();

        let http = reqwest::Client::new();
        let req = registry
            .apply_all(http.get("http://localhost/"))
            .build()
            .unwrap();
        let order: Vec<&str> = req
            .headers()
            .get_all("x-order")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = AuthRegistry::new();
        assert_eq!(registry.len(), 0);
    }
}
