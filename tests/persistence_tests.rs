//! Integration tests for order persistence
//!
//! Covers the persisted layout, reload through both storage backends, and
//! the best-effort policy when the backend fails.

use foodfleet::core::store::{decode_orders, encode_orders};
use foodfleet::prelude::*;
use serde_json::{Value, json};
use std::cell::Cell;
use std::io;

/// Storage double whose reads and writes can be switched to fail
#[derive(Default)]
struct FlakyStorage {
    inner: InMemoryStorage,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl FlakyStorage {
    fn io_error(key: &str) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source: io::Error::other("quota exceeded"),
        }
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(Self::io_error(key));
        }
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(Self::io_error(key));
        }
        self.inner.set_item(key, value)
    }}

fn input(id: &str, paid: bool, km: &str) -> OrderInput {
    OrderInput::new(id, "Cafe", "2", km, paid)
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_persisted_layout_is_json_array_in_insertion_order() {
    let storage = InMemoryStorage::new();
    let (mut desk, _) = OrderManager::open(storage.clone(), &FleetConfig::default());

    let _ = desk.add(&input("ORD2", true, "4")).unwrap();
    let _ = desk.add(&input("ORD1", false, "1.25")).unwrap();

    let raw = storage.get_item("foodDeliveryOrders").unwrap().unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!([
            {"orderId": "ORD2", "restaurantName": "Cafe", "itemCount": 2, "isPaid": true, "deliveryDistance": 4.0},
            {"orderId": "ORD1", "restaurantName": "Cafe", "itemCount": 2, "isPaid": false, "deliveryDistance": 1.25}
        ])
    );
}

#[test]
fn test_round_trip_reproduces_collection() {
    let orders = foodfleet::demo::sample_orders();
    let decoded = decode_orders(&encode_orders(&orders).unwrap()).unwrap();
    assert_eq!(decoded, orders);
}

// =============================================================================
// Reload
// =============================================================================

#[test]
fn test_reopen_in_memory_restores_orders() {
    let storage = InMemoryStorage::new();
    let config = FleetConfig::default();
    {
        let (mut desk, _) = OrderManager::open(storage.clone(), &config);
        let _ = desk.load_demo_data().unwrap();
        assert!(desk.remove("ORD002").unwrap().is_persisted());
    }

    let (desk, warning) = OrderManager::open(storage, &config);
    assert!(warning.is_none());
    assert_eq!(desk.stats().total, 5);
    assert!(desk.orders().iter().all(|o| o.order_id != "ORD002"));
}

#[test]
fn test_reopen_from_disk_restores_orders() {
    let dir = tempfile::tempdir().unwrap();
    let config = FleetConfig {
        storage_dir: Some(dir.path().display().to_string()),
        ..FleetConfig::default()
    };

    {
        let storage = FileStorage::open(dir.path()).unwrap();
        let (mut desk, _) = OrderManager::open(storage, &config);
        let _ = desk.add(&input("DISK1", false, "3.3")).unwrap();
        let _ = desk.add(&input("DISK2", true, "0.7")).unwrap();
    }

    let storage = FileStorage::open(dir.path()).unwrap();
    let (desk, warning) = OrderManager::open(storage, &config);
    assert!(warning.is_none());

    let ids: Vec<_> = desk.orders().iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["DISK1", "DISK2"]);
}

#[test]
fn test_custom_storage_key() {
    let storage = InMemoryStorage::new();
    let config = FleetConfig::from_yaml_str("storage_key: otherDesk\n").unwrap();
    let (mut desk, _) = OrderManager::open(storage.clone(), &config);

    let _ = desk.add(&input("ORD1", false, "1")).unwrap();

    assert!(storage.get_item("otherDesk").unwrap().is_some());
    assert!(storage.get_item("foodDeliveryOrders").unwrap().is_none());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_write_failure_keeps_in_memory_change() {
    let storage = FlakyStorage::default();
    storage.fail_writes.set(true);
    let (mut desk, _) = OrderManager::open(storage, &FleetConfig::default());

    let status = desk.add(&input("ORD1", false, "1")).unwrap();

    let warning = status.warning().expect("write should have failed");
    assert_eq!(warning.operation, PersistenceOperation::Write);
    assert_eq!(desk.stats().total, 1);
    assert!(desk.store().storage().inner.get_item("foodDeliveryOrders").unwrap().is_none());
}

#[test]
fn test_next_successful_write_resyncs() {
    let storage = FlakyStorage::default();
    storage.fail_writes.set(true);
    let (mut desk, _) = OrderManager::open(storage, &FleetConfig::default());

    assert!(!desk.add(&input("ORD1", false, "1")).unwrap().is_persisted());
    desk.store().storage().fail_writes.set(false);
    assert!(desk.add(&input("ORD2", false, "2")).unwrap().is_persisted());

    let raw = desk
        .store()
        .storage()
        .inner
        .get_item("foodDeliveryOrders")
        .unwrap()
        .unwrap();
    assert_eq!(decode_orders(&raw).unwrap().len(), 2);
}

#[test]
fn test_read_failure_starts_empty_with_warning() {
    let storage = FlakyStorage::default();
    storage
        .inner
        .set_item("foodDeliveryOrders", &encode_orders(&foodfleet::demo::sample_orders()).unwrap())
        .unwrap();
    storage.fail_reads.set(true);

    let (desk, warning) = OrderManager::open(storage, &FleetConfig::default());

    assert_eq!(warning.unwrap().operation, PersistenceOperation::Read);
    assert!(desk.orders().is_empty());
}

#[test]
fn test_malformed_data_starts_empty_with_warning() {
    let storage = InMemoryStorage::with_item("foodDeliveryOrders", r#"[{"orderId": 7}]"#);
    let (desk, warning) = OrderManager::open(storage, &FleetConfig::default());

    let warning = warning.expect("malformed data should warn");
    assert_eq!(warning.error_code(), "PERSISTENCE_READ_FAILED");
    assert!(desk.orders().is_empty());
}
