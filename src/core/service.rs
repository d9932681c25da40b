//! Order desk facade
//!
//! [`OrderManager`] is what a presentation layer talks to: it validates form
//! input, mutates the store, keeps the active filter criteria and answers
//! assignment and stats queries. Every call is synchronous and returns a
//! typed result; rendering and notifications stay with the caller.

use crate::config::{FleetConfig, ValidationLimits};
use crate::core::assignment::{Assignment, select_nearest_unpaid};
use crate::core::error::{
    FleetError, OrderError, OrderField, PersistenceError, ValidationError, ValidationKind,
};
use crate::core::filter::{FilterCriteria, FilteredView};
use crate::core::order::{Order, OrderInput};
use crate::core::stats::{OrderStats, compute_stats};
use crate::core::store::{OrderStore, SyncStatus};
use crate::core::validation::{filters, parse_max_distance, validate_order_input};
use crate::demo::sample_orders;
use crate::storage::KeyValueStorage;

pub struct OrderManager<S> {
    store: OrderStore<S>,
    criteria: FilterCriteria,
    limits: ValidationLimits,
}

impl<S: KeyValueStorage> OrderManager<S> {
    /// Load persisted orders and start with no active filter
    ///
    /// The returned warning is set when saved orders could not be read and
    /// the desk started empty instead.
    pub fn open(storage: S, config: &FleetConfig) -> (Self, Option<PersistenceError>) {
        let (store, warning) = OrderStore::open(storage, config);
        (Self::with_store(store, config.limits.clone()), warning)
    }

    pub fn with_store(store: OrderStore<S>, limits: ValidationLimits) -> Self {
        Self {
            store,
            criteria: FilterCriteria::all(),
            limits,
        }
    }

    /// Validate and add an order from form fields
    ///
    /// On success the active filter is cleared so the new order is visible.
    pub fn add(&mut self, input: &OrderInput) -> Result<SyncStatus, FleetError> {
        let input = filters::trim(input);
        let order = validate_order_input(&input, &self.limits)?;
        let status = self.store.add(order)?;

        self.criteria = FilterCriteria::all();
        Ok(status)
    }

    /// Delete an order by its exact id
    pub fn remove(&mut self, order_id: &str) -> Result<SyncStatus, OrderError> {
        self.store.remove(order_id)
    }

    /// Derive a view for `criteria` without changing the active criteria
    pub fn filter(&self, criteria: FilterCriteria) -> Result<FilteredView, ValidationError> {
        criteria.check()?;
        Ok(FilteredView::derive(self.store.all(), criteria))
    }

    /// Make `criteria` the active filter and return the resulting view
    ///
    /// Invalid criteria leave the active filter unchanged.
    pub fn apply_filter(
        &mut self,
        criteria: FilterCriteria,
    ) -> Result<FilteredView, ValidationError> {
        let view = self.filter(criteria)?;
        self.criteria = criteria;
        Ok(view)
    }

    /// Reset the active filter to show every order
    pub fn clear_filters(&mut self) -> FilteredView {
        self.criteria = FilterCriteria::all();
        self.current_view()
    }

    /// The view under the active criteria
    pub fn current_view(&self) -> FilteredView {
        FilteredView::derive(self.store.all(), self.criteria)
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria
    }

    /// Assign the nearest unpaid order within `max_distance` KM
    pub fn assign(&self, max_distance: f64) -> Result<Assignment, FleetError> {
        if !max_distance.is_finite() {
            return Err(
                ValidationError::new(OrderField::MaxDistance, ValidationKind::NotANumber).into(),
            );
        }
        if max_distance <= 0.0 {
            return Err(
                ValidationError::new(OrderField::MaxDistance, ValidationKind::NotPositive).into(),
            );
        }

        Ok(select_nearest_unpaid(self.store.all(), max_distance)?)
    }

    /// Same as [`assign`](Self::assign), parsing the threshold as typed
    pub fn assign_raw(&self, max_distance: &str) -> Result<Assignment, FleetError> {
        let max_distance = parse_max_distance(max_distance)?;
        self.assign(max_distance)
    }

    pub fn stats(&self) -> OrderStats {
        compute_stats(self.store.all())
    }

    /// Orders in insertion order
    pub fn orders(&self) -> &[Order] {
        self.store.all()
    }

    /// Fill an empty desk with the built-in sample orders
    pub fn load_demo_data(&mut self) -> Result<SyncStatus, OrderError> {
        self.store.seed(sample_orders())
    }

    /// Remove every order and the active filter
    pub fn clear_all(&mut self) -> SyncStatus {
        self.criteria = FilterCriteria::all();
        self.store.clear()
    }

    pub fn store(&self) -> &OrderStore<S> {
        &self.store
    }
}
