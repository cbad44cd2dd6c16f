//! Data types exchanged with the Petstore API.
//!
//! All models serialize with the camelCase wire names the API expects and
//! omit unset optional fields.

mod api_response;
mod order;
mod pet;
mod user;

pub use api_response::ApiResponse;
pub use order::{Order, OrderStatus};
pub use pet::{Category, Pet, PetStatus, Tag};
pub use user::User;
