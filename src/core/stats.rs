//! Order counters

use crate::core::order::Order;
use serde::Serialize;

/// Snapshot of order counts; `paid + unpaid == total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub paid: usize,
    pub unpaid: usize,
}

/// Count orders by payment status in a single pass
pub fn compute_stats(orders: &[Order]) -> OrderStats {
    let paid = orders.iter().filter(|o| o.is_paid).count();

    OrderStats {
        total: orders.len(),
        paid,
        unpaid: orders.len() - paid,
    }
}
