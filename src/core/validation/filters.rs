//! Input filters
//!
//! These filters normalize raw form values before validation

use crate::core::order::OrderInput;

/// Filter: trim surrounding whitespace from every text field
pub fn trim(input: &OrderInput) -> OrderInput {
    OrderInput {
        order_id: input.order_id.trim().to_string(),
        restaurant_name: input.restaurant_name.trim().to_string(),
        item_count: input.item_count.trim().to_string(),
        delivery_distance: input.delivery_distance.trim().to_string(),
        is_paid: input.is_paid,
    }
}

/// Filter: treat a blank optional value as absent
pub fn blank_as_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
