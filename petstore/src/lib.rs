//! Typed async client for the Swagger Petstore REST API.
//!
//! This crate wraps the Petstore HTTP surface in typed service clients
//! built on [`reqwest`]. Configuration and authentication are collected
//! on a builder, then frozen into an immutable [`ApiClient`] that is
//! cheap to clone and safe to share across tasks.
//!
//! ## Auth Schemes
//!
//! | Scheme | Kind | Applied as |
//! |--------|------|------------|
//! | `petstore_auth` | OAuth2 (implicit by default) | `Authorization: Bearer ...` |
//! | `api_key` | API key | `api_key` header |
//!
//! Schemes are registered by name at build time and applied to every
//! request in registration order. Unknown or duplicate names fail at
//! registration, not at request time.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use petstore::apis::PetApi;
//! use petstore::client::ApiClientBuilder;
//! use petstore::models::PetStatus;
//!
//! let client = ApiClientBuilder::with_auth_schemes(["petstore_auth"])?
//!     .build()?;
//! client.set_access_token("token-from-your-auth-dance");
//!
//! let pets: PetApi = client.service();
//! let available = pets.find_pets_by_status(&[PetStatus::Available]).await?;
//! ```
//!
//! OAuth token acquisition, refresh-and-retry on 401, HTTP line logging,
//! and header redaction are handled inside the client; see the
//! [`auth`] and [`client`] modules.

pub mod apis;
pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod response;

// Client surface
pub use client::{ApiCall, ApiClient, ApiClientBuilder, DEFAULT_BASE_URL};

// Services
pub use apis::{CollectionFormat, PetApi, Service, StoreApi, UserApi};

// Auth
pub use auth::{
    AccessTokenListener, ApiKeyAuth, AuthInterceptor, AuthorizationEndpoint, HttpBasicAuth,
    Interceptor, KeyLocation, OAuth, OAuth2Token, OAuthFlow, TokenEndpoint,
};

// Requests and responses
pub use endpoint::Endpoint;
pub use response::{EmptyFormat, JsonFormat, ResponseFormat, XmlFormat};

// Errors
pub use error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
