//! Store order types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// An order for a pet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier, assigned by the server when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The pet being ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,

    /// Number of pets ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,

    /// Requested shipping time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<DateTime<Utc>>,

    /// Fulfilment status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    /// Whether the order has been completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// Fulfilment status of an order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    /// Order received.
    Placed,
    /// Order approved for shipping.
    Approved,
    /// Order delivered.
    Delivered,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ship_date_round_trips_as_rfc3339() {
        let order = Order {
            id: Some(3),
            pet_id: Some(7),
            quantity: Some(1),
            ship_date: Some(Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap()),
            status: Some(OrderStatus::Placed),
            complete: Some(false),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["petId"], 7);
        assert_eq!(json["shipDate"], "2023-05-01T12:00:00Z");
        assert_eq!(json["status"], "placed");

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn empty_order_serializes_to_empty_object() {
        let json = serde_json::to_string(&Order::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
