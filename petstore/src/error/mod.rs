//! Error types for the Petstore client.
//!
//! Errors are grouped by layer: [`ConfigError`] for client setup problems,
//! [`AuthError`] for credential and token failures, [`ClientError`] for
//! transport and HTTP status failures, and [`ValidationError`] for response
//! decoding failures. [`ApiError`] aggregates all of them for callers that
//! want a single error type.

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
