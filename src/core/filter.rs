//! Filtered views over the order store
//!
//! A [`FilteredView`] is derived state: it is recomputed from the store
//! snapshot and a [`FilterCriteria`] value every time and never mutated.

use crate::core::error::{OrderField, ValidationError, ValidationKind};
use crate::core::order::Order;
use crate::core::validation::{filters::blank_as_none, parse_max_distance};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment status predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl PaymentStatus {
    /// Whether an order passes this predicate
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            PaymentStatus::All => true,
            PaymentStatus::Paid => order.is_paid,
            PaymentStatus::Unpaid => !order.is_paid,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(PaymentStatus::All),
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::All => f.write_str("all"),
            PaymentStatus::Paid => f.write_str("paid"),
            PaymentStatus::Unpaid => f.write_str("unpaid"),
        }
    }
}

/// The active status/distance predicate pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub status: PaymentStatus,

    /// Keep only orders at or below this distance (KM)
    pub max_distance: Option<f64>,
}

impl FilterCriteria {
    pub fn new(status: PaymentStatus, max_distance: Option<f64>) -> Self {
        Self {
            status,
            max_distance,
        }
    }

    /// Criteria that keep every order
    pub fn all() -> Self {
        Self::default()
    }

    /// Build criteria from the raw select and text values of a filter form
    ///
    /// A blank distance means no distance filter. A present distance must be
    /// a finite number greater than zero.
    pub fn parse(status: &str, max_distance: Option<&str>) -> Result<Self, ValidationError> {
        // unknown statuses fall back to no status filter, like an unset select
        let status = status.parse().unwrap_or_default();
        let max_distance = blank_as_none(max_distance)
            .map(parse_max_distance)
            .transpose()?;

        Ok(Self::new(status, max_distance))
    }

    /// Reject a present distance that is not a positive finite number
    pub fn check(&self) -> Result<(), ValidationError> {
        match self.max_distance {
            Some(d) if !d.is_finite() => Err(ValidationError::new(
                OrderField::MaxDistance,
                ValidationKind::NotANumber,
            )),
            Some(d) if d <= 0.0 => Err(ValidationError::new(
                OrderField::MaxDistance,
                ValidationKind::NotPositive,
            )),
            _ => Ok(()),
        }
    }

    /// Whether these criteria can exclude anything
    pub fn is_active(&self) -> bool {
        self.status != PaymentStatus::All || self.max_distance.is_some()
    }

    /// Whether an order passes both predicates
    pub fn matches(&self, order: &Order) -> bool {
        self.status.matches(order)
            && self
                .max_distance
                .filter(|max| *max > 0.0)
                .is_none_or(|max| order.delivery_distance <= max)
    }
}

/// Apply criteria to a store snapshot, preserving store order
pub fn apply_filters(orders: &[Order], criteria: &FilterCriteria) -> Vec<Order> {
    let result: Vec<Order> = orders
        .iter()
        .filter(|order| criteria.matches(order))
        .cloned()
        .collect();

    tracing::debug!(
        status = %criteria.status,
        max_distance = ?criteria.max_distance,
        total = orders.len(),
        matched = result.len(),
        "Applied order filters"
    );

    result
}

/// Sort orders nearest first; equal distances keep their relative order
pub fn sort_for_display(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| a.delivery_distance.total_cmp(&b.delivery_distance));
    orders
}

/// Result of filtering the store, with enough context to report it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    pub criteria: FilterCriteria,

    /// Matching orders in store order
    pub orders: Vec<Order>,

    /// Number of orders in the store when the view was derived
    pub store_total: usize,
}

impl FilteredView {
    /// Derive the view for `criteria` from a store snapshot
    pub fn derive(orders: &[Order], criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            orders: apply_filters(orders, &criteria),
            store_total: orders.len(),
        }
    }

    /// No orders exist at all
    pub fn is_store_empty(&self) -> bool {
        self.store_total == 0
    }

    pub fn has_matches(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Whether the view hides any part of the store by construction
    pub fn is_filtered(&self) -> bool {
        self.criteria.is_active()
    }

    /// Matching orders, nearest first
    pub fn sorted(&self) -> Vec<Order> {
        sort_for_display(self.orders.clone())
    }

    /// One-line summary for a status message
    pub fn summary(&self) -> String {
        if self.is_store_empty() {
            "Add some orders first to test filtering!".to_string()
        } else if !self.has_matches() {
            "No orders match the current filters. Try different criteria.".to_string()
        } else if self.is_filtered() {
            format!(
                "Showing {} of {} orders.",
                self.orders.len(),
                self.store_total
            )
        } else {
            format!("Showing all {} orders.", self.store_total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Order> {
        vec![
            Order::new("A", "R1", 2, false, 3.0),
            Order::new("B", "R2", 1, false, 1.5),
            Order::new("C", "R3", 4, true, 0.5),
        ]
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.order_id.as_str()).collect()
    }

    // === apply_filters() ===

    #[test]
    fn test_all_keeps_everything_in_store_order() {
        let result = apply_filters(&sample(), &FilterCriteria::all());
        assert_eq!(ids(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_status_filters() {
        let paid = apply_filters(&sample(), &FilterCriteria::new(PaymentStatus::Paid, None));
        assert_eq!(ids(&paid), vec!["C"]);

        let unpaid = apply_filters(&sample(), &FilterCriteria::new(PaymentStatus::Unpaid, None));
        assert_eq!(ids(&unpaid), vec!["A", "B"]);
    }

    #[test]
    fn test_unpaid_within_distance() {
        let criteria = FilterCriteria::new(PaymentStatus::Unpaid, Some(2.0));
        let result = apply_filters(&sample(), &criteria);
        assert_eq!(ids(&result), vec!["B"]);
    }

    #[test]
    fn test_distance_bound_is_inclusive() {
        let criteria = FilterCriteria::new(PaymentStatus::All, Some(3.0));
        let result = apply_filters(&sample(), &criteria);
        assert_eq!(ids(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let criteria = FilterCriteria::new(PaymentStatus::Unpaid, Some(2.5));
        let once = apply_filters(&sample(), &criteria);
        let twice = apply_filters(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input_is_legal() {
        let criteria = FilterCriteria::new(PaymentStatus::Paid, Some(1.0));
        assert!(apply_filters(&[], &criteria).is_empty());
    }

    // === sort_for_display() ===

    #[test]
    fn test_sort_for_display_is_stable() {
        let orders = vec![
            Order::new("X1", "R", 1, false, 2.0),
            Order::new("X2", "R", 1, true, 1.0),
            Order::new("X3", "R", 1, false, 2.0),
            Order::new("X4", "R", 1, false, 1.0),
        ];
        assert_eq!(ids(&sort_for_display(orders)), vec!["X2", "X4", "X1", "X3"]);
    }

    // === FilterCriteria ===

    #[test]
    fn test_parse_criteria_from_form_values() {
        let criteria = FilterCriteria::parse("unpaid", Some(" 2.5 ")).unwrap();
        assert_eq!(criteria, FilterCriteria::new(PaymentStatus::Unpaid, Some(2.5)));

        let criteria = FilterCriteria::parse("all", Some("")).unwrap();
        assert_eq!(criteria, FilterCriteria::all());
        assert!(!criteria.is_active());
    }

    #[test]
    fn test_parse_criteria_rejects_non_positive_distance() {
        let err = FilterCriteria::parse("all", Some("-1")).unwrap_err();
        assert_eq!(err.field, OrderField::MaxDistance);
        assert_eq!(err.kind, ValidationKind::NotPositive);

        assert!(FilterCriteria::parse("paid", Some("0")).is_err());
        assert!(FilterCriteria::parse("paid", Some("near")).is_err());
    }

    #[test]
    fn test_check_guards_constructed_criteria() {
        assert!(FilterCriteria::new(PaymentStatus::All, Some(1.0)).check().is_ok());
        assert!(FilterCriteria::new(PaymentStatus::All, None).check().is_ok());
        assert!(FilterCriteria::new(PaymentStatus::All, Some(0.0)).check().is_err());
        assert!(FilterCriteria::new(PaymentStatus::All, Some(f64::NAN)).check().is_err());
    }

    #[test]
    fn test_payment_status_from_str() {
        assert_eq!("PAID".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!("".parse::<PaymentStatus>().unwrap(), PaymentStatus::All);
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }

    // === FilteredView ===

    #[test]
    fn test_view_distinguishes_empty_store_from_no_match() {
        let empty = FilteredView::derive(&[], FilterCriteria::all());
        assert!(empty.is_store_empty());
        assert!(!empty.has_matches());

        let none =
            FilteredView::derive(&sample(), FilterCriteria::new(PaymentStatus::Paid, Some(0.1)));
        assert!(!none.is_store_empty());
        assert!(!none.has_matches());
        assert!(none.summary().contains("No orders match"));
    }

    #[test]
    fn test_view_summary_counts() {
        let view =
            FilteredView::derive(&sample(), FilterCriteria::new(PaymentStatus::Unpaid, None));
        assert_eq!(view.summary(), "Showing 2 of 3 orders.");
        assert_eq!(ids(&view.sorted()), vec!["B", "A"]);
    }
}
