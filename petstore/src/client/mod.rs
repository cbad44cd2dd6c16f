//! HTTP client construction and request execution.
//!
//! [`ApiClientBuilder`] collects configuration and auth schemes, then
//! [`build`](ApiClientBuilder::build) freezes them into an [`ApiClient`].
//! The built client is immutable apart from token rotation, cheap to
//! clone, and safe to share across tasks.

mod builder;
mod executor;
pub(crate) mod logging;

pub use builder::{ApiClientBuilder, DEFAULT_BASE_URL};
pub use executor::{ApiCall, ApiClient};
