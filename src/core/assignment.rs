//! Nearest unpaid order selection

use crate::core::error::AssignmentError;
use crate::core::order::Order;
use serde::Serialize;

/// A successful delivery assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// The nearest eligible order
    pub order: Order,

    /// How many orders were eligible under the threshold
    pub total_eligible: usize,

    pub max_distance: f64,
}

impl Assignment {
    /// Note for the result panel
    pub fn summary(&self) -> String {
        if self.total_eligible > 1 {
            format!(
                "Selected from {} eligible orders within {} KM",
                self.total_eligible, self.max_distance
            )
        } else {
            format!(
                "This was the only eligible order within {} KM",
                self.max_distance
            )
        }
    }
}

/// Pick the unpaid order with the smallest delivery distance not exceeding
/// `max_distance`.
///
/// On equal distances the first order in store order wins. `max_distance`
/// must already be a finite number greater than zero. This never mutates
/// anything.
pub fn select_nearest_unpaid(
    orders: &[Order],
    max_distance: f64,
) -> Result<Assignment, AssignmentError> {
    if orders.is_empty() {
        return Err(AssignmentError::NoOrdersExist);
    }

    let mut nearest: Option<&Order> = None;
    let mut total_eligible = 0;

    for order in orders {
        let eligible = order.is_eligible_within(max_distance);
        tracing::trace!(
            order_id = %order.order_id,
            is_paid = order.is_paid,
            distance = order.delivery_distance,
            eligible,
            "Checked order for assignment"
        );
        if !eligible {
            continue;
        }

        total_eligible += 1;
        // strict comparison keeps the first-seen order on ties
        if nearest.is_none_or(|best| order.delivery_distance < best.delivery_distance) {
            nearest = Some(order);
        }
    }

    let Some(order) = nearest else {
        let closest_unpaid_distance = orders
            .iter()
            .filter(|o| !o.is_paid)
            .map(|o| o.delivery_distance)
            .min_by(f64::total_cmp);

        tracing::debug!(
            max_distance,
            ?closest_unpaid_distance,
            "No eligible order for assignment"
        );
        return Err(AssignmentError::NoEligibleOrder {
            max_distance,
            closest_unpaid_distance,
        });
    };

    tracing::debug!(
        order_id = %order.order_id,
        distance = order.delivery_distance,
        total_eligible,
        "Selected nearest unpaid order"
    );

    Ok(Assignment {
        order: order.clone(),
        total_eligible,
        max_distance,
    })
}
