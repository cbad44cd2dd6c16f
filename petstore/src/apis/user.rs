//! Operations on user accounts and sessions.

use reqwest::Method;

use crate::apis::Service;
use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::models::User;
use crate::response::{EmptyFormat, JsonFormat};

/// Typed client for the `user` operation group.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl Service for UserApi {
    fn from_client(client: ApiClient) -> Self {
        Self { client }
    }
}

impl UserApi {
    /// Creates a user account.
    pub async fn create_user(&self, user: &User) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new("create_user", Method::POST, "user"))
            .json(user)?
            .send()
            .await
    }

    /// Creates several users from an array payload.
    pub async fn create_users_with_array(&self, users: &[User]) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "create_users_with_array",
                Method::POST,
                "user/createWithArray",
            ))
            .json(users)?
            .send()
            .await
    }

    /// Creates several users from a list payload.
    pub async fn create_users_with_list(&self, users: &[User]) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "create_users_with_list",
                Method::POST,
                "user/createWithList",
            ))
            .json(users)?
            .send()
            .await
    }

    /// Logs a user in and returns the server's session message.
    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<String>>::new(
                "login_user",
                Method::GET,
                "user/login",
            ))
            .query("username", username)
            .query("password", password)
            .send()
            .await
    }

    /// Logs the current session out.
    pub async fn logout_user(&self) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "logout_user",
                Method::GET,
                "user/logout",
            ))
            .send()
            .await
    }

    /// Fetches a user by username.
    pub async fn get_user_by_name(&self, username: &str) -> Result<User, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<User>>::new(
                "get_user_by_name",
                Method::GET,
                "user/{username}",
            ))
            .path_param("username", username)
            .send()
            .await
    }

    /// Updates a user account.
    pub async fn update_user(&self, username: &str, user: &User) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "update_user",
                Method::PUT,
                "user/{username}",
            ))
            .path_param("username", username)
            .json(user)?
            .send()
            .await
    }

    /// Deletes a user account.
    pub async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "delete_user",
                Method::DELETE,
                "user/{username}",
            ))
            .path_param("username", username)
            .send()
            .await
    }
}
