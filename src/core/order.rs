//! Order record and raw form input

use serde::{Deserialize, Serialize};

/// A delivery order as held by the store and persisted to storage.
///
/// Field names serialize in camelCase (`orderId`, `restaurantName`,
/// `itemCount`, `isPaid`, `deliveryDistance`) so the persisted layout is
/// interchangeable with the browser widget's local storage entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Case-insensitive unique key within a store
    pub order_id: String,

    pub restaurant_name: String,

    /// Number of items, within [1, 100]
    pub item_count: u32,

    pub is_paid: bool,

    /// Distance in kilometers, within (0, 1000]
    pub delivery_distance: f64,
}

impl Order {
    /// Create a new order
    ///
    /// No validation happens here; user-supplied values go through
    /// [`crate::core::validation::validate_order_input`].
    pub fn new(
        order_id: impl Into<String>,
        restaurant_name: impl Into<String>,
        item_count: u32,
        is_paid: bool,
        delivery_distance: f64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            restaurant_name: restaurant_name.into(),
            item_count,
            is_paid,
            delivery_distance,
        }
    }

    /// Case-insensitive id comparison used for uniqueness checks
    pub fn has_id_like(&self, order_id: &str) -> bool {
        self.order_id.to_lowercase() == order_id.to_lowercase()
    }

    /// Whether this order can be picked up by a courier limited to `max_distance`
    pub fn is_eligible_within(&self, max_distance: f64) -> bool {
        !self.is_paid && self.delivery_distance <= max_distance
    }
}

/// Raw order fields as delivered by the presentation layer.
///
/// Text fields are expected to be trimmed already; numeric fields stay as
/// strings so that parsing failures surface as validation errors in the
/// fixed check order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub order_id: String,
    pub restaurant_name: String,
    pub item_count: String,
    pub delivery_distance: String,
    #[serde(default)]
    pub is_paid: bool,
}

impl OrderInput {
    pub fn new(
        order_id: impl Into<String>,
        restaurant_name: impl Into<String>,
        item_count: impl Into<String>,
        delivery_distance: impl Into<String>,
        is_paid: bool,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            restaurant_name: restaurant_name.into(),
            item_count: item_count.into(),
            delivery_distance: delivery_distance.into(),
            is_paid,
        }
    }
}
