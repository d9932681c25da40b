//! Persisted order store
//!
//! [`OrderStore`] is the single owner of the order collection. Every
//! mutation rewrites the whole collection under one storage key. Writes are
//! best-effort: a failed write is reported through [`SyncStatus`] but the
//! in-memory change stays.

use crate::config::{FleetConfig, ValidationLimits};
use crate::core::error::{OrderError, PersistenceError};
use crate::core::order::Order;
use crate::core::validation::validate_order;
use crate::storage::KeyValueStorage;
use std::collections::HashSet;

/// Serialize orders to the persisted JSON array layout
pub fn encode_orders(orders: &[Order]) -> serde_json::Result<String> {
    serde_json::to_string(orders)
}

/// Parse the persisted JSON array layout
pub fn decode_orders(raw: &str) -> serde_json::Result<Vec<Order>> {
    serde_json::from_str(raw)
}

/// Outcome of writing the collection after a mutation
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Storage holds the current collection
    Persisted,

    /// The mutation applied in memory only
    Unsaved(PersistenceError),
}

impl SyncStatus {
    pub fn is_persisted(&self) -> bool {
        matches!(self, SyncStatus::Persisted)
    }

    /// The write failure, if any
    pub fn warning(&self) -> Option<&PersistenceError> {
        match self {
            SyncStatus::Persisted => None,
            SyncStatus::Unsaved(e) => Some(e),
        }
    }
}

pub struct OrderStore<S> {
    orders: Vec<Order>,
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> OrderStore<S> {
    /// Create an empty store without reading `storage`
    pub fn empty(storage: S, key: impl Into<String>) -> Self {
        Self {
            orders: Vec::new(),
            storage,
            key: key.into(),
        }
    }

    /// Load the persisted collection, if present
    ///
    /// Missing or empty data yields an empty store. Unreadable or malformed
    /// data also yields an empty store, together with the read error as a
    /// warning.
    pub fn open(storage: S, config: &FleetConfig) -> (Self, Option<PersistenceError>) {
        let mut store = Self::empty(storage, config.storage_key.clone());
        let limits = config.validate_on_load.then_some(&config.limits);

        match store.load(limits) {
            Ok(orders) => {
                tracing::debug!(key = %store.key, count = orders.len(), "Loaded orders");
                store.orders = orders;
                (store, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load saved orders, starting empty");
                (store, Some(e))
            }
        }
    }

    fn load(&self, limits: Option<&ValidationLimits>) -> Result<Vec<Order>, PersistenceError> {
        let raw = self
            .storage
            .get_item(&self.key)
            .map_err(|e| PersistenceError::read(&self.key, e.to_string()))?;

        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        let orders =
            decode_orders(&raw).map_err(|e| PersistenceError::read(&self.key, e.to_string()))?;

        if let Some(limits) = limits {
            check_loaded(&orders, limits).map_err(|msg| PersistenceError::read(&self.key, msg))?;
        }

        Ok(orders)
    }

    fn persist(&self) -> SyncStatus {
        let result = encode_orders(&self.orders)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set_item(&self.key, &json)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => SyncStatus::Persisted,
            Err(msg) => {
                let err = PersistenceError::write(&self.key, msg);
                tracing::warn!(error = %err, "Could not save orders");
                SyncStatus::Unsaved(err)
            }
        }
    }

    /// Append an order unless its id is already taken (ignoring case)
    pub fn add(&mut self, order: Order) -> Result<SyncStatus, OrderError> {
        if self.contains_id(&order.order_id) {
            return Err(OrderError::DuplicateId {
                order_id: order.order_id,
            });
        }

        tracing::debug!(order_id = %order.order_id, "Adding order");
        self.orders.push(order);
        Ok(self.persist())
    }

    /// Remove the first order whose id matches exactly
    pub fn remove(&mut self, order_id: &str) -> Result<SyncStatus, OrderError> {
        let index = self
            .orders
            .iter()
            .position(|o| o.order_id == order_id)
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.to_string(),
            })?;

        tracing::debug!(order_id, "Removing order");
        self.orders.remove(index);
        Ok(self.persist())
    }

    /// Append a batch of orders to an empty store
    pub fn seed(&mut self, orders: Vec<Order>) -> Result<SyncStatus, OrderError> {
        if !self.orders.is_empty() {
            return Err(OrderError::StoreNotEmpty {
                count: self.orders.len(),
            });
        }

        let mut seen = HashSet::new();
        for order in &orders {
            if !seen.insert(order.order_id.to_lowercase()) {
                return Err(OrderError::DuplicateId {
                    order_id: order.order_id.clone(),
                });
            }
        }

        self.orders = orders;
        Ok(self.persist())
    }

    /// Remove every order
    pub fn clear(&mut self) -> SyncStatus {
        self.orders.clear();
        self.persist()
    }

    /// Read-only snapshot in insertion order
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Whether an order with this id exists, ignoring case
    pub fn contains_id(&self, order_id: &str) -> bool {
        self.orders.iter().any(|o| o.has_id_like(order_id))
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Reject a loaded collection that could not have been built through `add`
fn check_loaded(orders: &[Order], limits: &ValidationLimits) -> Result<(), String> {
    let mut seen = HashSet::new();

    for order in orders {
        validate_order(order, limits)
            .map_err(|e| format!("order '{}' is invalid: {}", order.order_id, e))?;

        if !seen.insert(order.order_id.to_lowercase()) {
            return Err(format!("duplicate order id '{}'", order.order_id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PersistenceOperation;
    use crate::storage::InMemoryStorage;

    fn config() -> FleetConfig {
        FleetConfig::default()
    }

    fn store() -> OrderStore<InMemoryStorage> {
        OrderStore::empty(InMemoryStorage::new(), "orders")
    }

    // === add() ===

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut store = store();
        assert!(store.add(Order::new("B01", "R", 1, false, 2.0)).unwrap().is_persisted());
        assert!(store.add(Order::new("A01", "R", 1, false, 1.0)).unwrap().is_persisted());

        let ids: Vec<_> = store.all().iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["B01", "A01"]);
    }

    #[test]
    fn test_add_rejects_case_insensitive_duplicate() {
        let mut store = store();
        let _ = store.add(Order::new("ord1", "R", 1, false, 2.0)).unwrap();

        let err = store.add(Order::new("ORD1", "Other", 2, true, 3.0)).unwrap_err();
        assert_eq!(
            err,
            OrderError::DuplicateId {
                order_id: "ORD1".to_string()
            }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].restaurant_name, "R");
    }

    #[test]
    fn test_add_persists_full_collection() {
        let storage = InMemoryStorage::new();
        let mut store = OrderStore::empty(storage.clone(), "orders");
        let _ = store.add(Order::new("ORD1", "R", 1, false, 2.0)).unwrap();

        let raw = storage.get_item("orders").unwrap().unwrap();
        assert_eq!(decode_orders(&raw).unwrap(), store.all());
    }

    // === remove() ===

    #[test]
    fn test_remove_matches_exact_id() {
        let mut store = store();
        let _ = store.add(Order::new("Ord1", "R", 1, false, 2.0)).unwrap();

        assert_eq!(
            store.remove("ORD1").unwrap_err(),
            OrderError::NotFound {
                order_id: "ORD1".to_string()
            }
        );
        assert!(store.remove("Ord1").unwrap().is_persisted());
        assert!(store.is_empty());
    }

    // === seed() / clear() ===

    #[test]
    fn test_seed_requires_empty_store() {
        let mut store = store();
        let _ = store.add(Order::new("ORD1", "R", 1, false, 2.0)).unwrap();

        assert_eq!(
            store.seed(vec![Order::new("ORD2", "R", 1, false, 1.0)]).unwrap_err(),
            OrderError::StoreNotEmpty { count: 1 }
        );
    }

    #[test]
    fn test_seed_rejects_duplicates_in_batch() {
        let mut store = store();
        let batch = vec![
            Order::new("ORD1", "R", 1, false, 2.0),
            Order::new("ord1", "R", 1, false, 1.0),
        ];
        assert!(matches!(store.seed(batch), Err(OrderError::DuplicateId { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_persists_empty_collection() {
        let storage = InMemoryStorage::new();
        let mut store = OrderStore::empty(storage.clone(), "orders");
        let _ = store.add(Order::new("ORD1", "R", 1, false, 2.0)).unwrap();

        assert!(store.clear().is_persisted());
        assert_eq!(storage.get_item("orders").unwrap(), Some("[]".to_string()));
    }

    // === open() ===

    #[test]
    fn test_open_without_saved_data_is_empty() {
        let (store, warning) = OrderStore::open(InMemoryStorage::new(), &config());
        assert!(store.is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn test_open_empty_saved_value_is_empty_without_warning() {
        let storage = InMemoryStorage::with_item("foodDeliveryOrders", "");

        let (store, warning) = OrderStore::open(storage, &config());
        assert!(store.is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn test_open_restores_saved_orders() {
        let orders = vec![
            Order::new("ORD1", "Cafe", 1, false, 2.0),
            Order::new("ORD2", "Bar", 3, true, 0.5),
        ];
        let storage =
            InMemoryStorage::with_item("foodDeliveryOrders", encode_orders(&orders).unwrap());

        let (store, warning) = OrderStore::open(storage, &config());
        assert!(warning.is_none());
        assert_eq!(store.all(), orders.as_slice());
    }

    #[test]
    fn test_open_malformed_data_resets_with_warning() {
        let storage = InMemoryStorage::with_item("foodDeliveryOrders", "{not json");

        let (store, warning) = OrderStore::open(storage, &config());
        assert!(store.is_empty());
        assert_eq!(warning.unwrap().operation, PersistenceOperation::Read);
    }

    #[test]
    fn test_open_invalid_record_resets_when_validating() {
        let orders = vec![
            Order::new("ORD1", "Cafe", 1, false, 2.0),
            Order::new("X", "Bar", 3, true, 0.5),
        ];
        let raw = encode_orders(&orders).unwrap();

        let (store, warning) = OrderStore::open(
            InMemoryStorage::with_item("foodDeliveryOrders", raw.clone()),
            &config(),
        );
        assert!(store.is_empty());
        assert!(warning.unwrap().message.contains("'X'"));

        let lenient = FleetConfig {
            validate_on_load: false,
            ..config()
        };
        let (store, warning) =
            OrderStore::open(InMemoryStorage::with_item("foodDeliveryOrders", raw), &lenient);
        assert!(warning.is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_open_duplicate_ids_reset_when_validating() {
        let orders = vec![
            Order::new("ORD1", "Cafe", 1, false, 2.0),
            Order::new("ord1", "Bar", 3, true, 0.5),
        ];
        let storage =
            InMemoryStorage::with_item("foodDeliveryOrders", encode_orders(&orders).unwrap());

        let (store, warning) = OrderStore::open(storage, &config());
        assert!(store.is_empty());
        assert!(warning.unwrap().message.contains("duplicate"));
    }

    // === encoding ===

    #[test]
    fn test_encode_decode_preserves_order_and_values() {
        let orders = vec![
            Order::new("ORD3", "Cafe", 100, false, 999.99),
            Order::new("ORD1", "Bar", 1, true, 0.001),
            Order::new("ORD2", "Pub", 7, false, 12.5),
        ];
        assert_eq!(decode_orders(&encode_orders(&orders).unwrap()).unwrap(), orders);
    }
}
