//! Order input validation
//!
//! Checks run in a fixed order and stop at the first failure, so the same
//! input always yields the same user-facing message:
//!
//! 1. order id present, then long enough
//! 2. restaurant name present, then long enough
//! 3. item count present, numeric, at least the minimum, at most the maximum
//! 4. delivery distance present, numeric, greater than zero, at most the maximum
//!
//! Uniqueness of the order id is not checked here; the store owns that.

pub mod filters;
pub mod validators;

use crate::config::ValidationLimits;
use crate::core::error::{OrderField, ValidationError};
use crate::core::order::{Order, OrderInput};
use validators::{max_value, min_length, min_value, parse_integer, parse_number, positive, required};

/// Validate raw form fields and build the resulting [`Order`]
pub fn validate_order_input(
    input: &OrderInput,
    limits: &ValidationLimits,
) -> Result<Order, ValidationError> {
    let present = required();

    present(OrderField::OrderId, input.order_id.as_str())?;
    min_length(limits.order_id_min_len)(OrderField::OrderId, input.order_id.as_str())?;

    present(OrderField::RestaurantName, input.restaurant_name.as_str())?;
    min_length(limits.restaurant_name_min_len)(
        OrderField::RestaurantName,
        input.restaurant_name.as_str(),
    )?;

    present(OrderField::ItemCount, input.item_count.as_str())?;
    let item_count = parse_integer(OrderField::ItemCount, input.item_count.as_str())?;
    min_value(f64::from(limits.item_count_min))(OrderField::ItemCount, item_count as f64)?;
    max_value(f64::from(limits.item_count_max))(OrderField::ItemCount, item_count as f64)?;

    present(OrderField::DeliveryDistance, input.delivery_distance.as_str())?;
    let distance = parse_number(OrderField::DeliveryDistance, input.delivery_distance.as_str())?;
    positive()(OrderField::DeliveryDistance, distance)?;
    max_value(limits.distance_max)(OrderField::DeliveryDistance, distance)?;

    Ok(Order::new(
        input.order_id.clone(),
        input.restaurant_name.clone(),
        // within [item_count_min, item_count_max], both u32
        item_count as u32,
        input.is_paid,
        distance,
    ))
}

/// Re-check an already built order against the same limits
///
/// Used when loading persisted orders, which never went through
/// [`validate_order_input`] in this process.
pub fn validate_order(order: &Order, limits: &ValidationLimits) -> Result<(), ValidationError> {
    let input = OrderInput::new(
        order.order_id.clone(),
        order.restaurant_name.clone(),
        order.item_count.to_string(),
        order.delivery_distance.to_string(),
        order.is_paid,
    );
    validate_order_input(&input, limits).map(|_| ())
}

/// Parse a distance threshold typed by the user (filter or assignment)
///
/// The value must be present, numeric and greater than zero.
pub fn parse_max_distance(value: &str) -> Result<f64, ValidationError> {
    required()(OrderField::MaxDistance, value.trim())?;
    let distance = parse_number(OrderField::MaxDistance, value)?;
    positive()(OrderField::MaxDistance, distance)?;
    Ok(distance)
}
