//! Operations on store orders and inventory.

use std::collections::HashMap;

use reqwest::Method;

use crate::apis::Service;
use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::models::Order;
use crate::response::{EmptyFormat, JsonFormat};

/// Typed client for the `store` operation group.
#[derive(Debug, Clone)]
pub struct StoreApi {
    client: ApiClient,
}

impl Service for StoreApi {
    fn from_client(client: ApiClient) -> Self {
        Self { client }
    }
}

impl StoreApi {
    /// Returns pet inventory counts keyed by status.
    ///
    /// Requires the `api_key` scheme when the server enforces it.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails.
    pub async fn get_inventory(&self) -> Result<HashMap<String, i32>, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<HashMap<String, i32>>>::new(
                "get_inventory",
                Method::GET,
                "store/inventory",
            ))
            .send()
            .await
    }

    /// Places an order for a pet.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or the order is rejected.
    pub async fn place_order(&self, order: &Order) -> Result<Order, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Order>>::new(
                "place_order",
                Method::POST,
                "store/order",
            ))
            .json(order)?
            .send()
            .await
    }

    /// Fetches an order by id.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or no order with the
    /// given id exists.
    pub async fn get_order_by_id(&self, order_id: i64) -> Result<Order, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Order>>::new(
                "get_order_by_id",
                Method::GET,
                "store/order/{orderId}",
            ))
            .path_param("orderId", order_id)
            .send()
            .await
    }

    /// Deletes an order by id.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or no order with the
    /// given id exists.
    pub async fn delete_order(&self, order_id: i64) -> Result<(), ApiError> {
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "delete_order",
                Method::DELETE,
                "store/order/{orderId}",
            ))
            .path_param("orderId", order_id)
            .send()
            .await
    }
}
