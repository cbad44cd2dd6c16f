//! Typed service clients for the Petstore API groups.
//!
//! Each service wraps an [`ApiClient`](crate::client::ApiClient) and
//! exposes one async method per operation. Services are created through
//! [`ApiClient::service`](crate::client::ApiClient::service):
//!
//! ```rust,ignore
//! use petstore::apis::{PetApi, StoreApi};
//! use petstore::client::ApiClient;
//!
//! let client = ApiClient::builder().build()?;
//! let pets: PetApi = client.service();
//! let store: StoreApi = client.service();
//! ```

mod pet;
mod store;
mod user;

pub use pet::PetApi;
pub use store::StoreApi;
pub use user::UserApi;

use crate::client::ApiClient;

/// A typed client for one group of API operations.
///
/// Implementors hold a clone of the [`ApiClient`] and therefore share
/// its connection pool, auth registry, and token state.
pub trait Service {
    /// Builds the service around the given client.
    fn from_client(client: ApiClient) -> Self;
}

/// How a multi-valued query parameter is rendered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionFormat {
    /// Comma separated, e.g. `status=available,pending`.
    #[default]
    Csv,
    /// Space separated.
    Ssv,
    /// Tab separated.
    Tsv,
    /// Pipe separated, e.g. `status=available|pending`.
    Pipes,
    /// One query pair per value, e.g. `status=available&status=pending`.
    Multi,
}

impl CollectionFormat {
    /// The joining separator, or `None` for repeated pairs.
    pub fn separator(&self) -> Option<&'static str> {
        match self {
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Tsv => Some("\t"),
            Self::Pipes => Some("|"),
            Self::Multi => None,
        }
    }
}
