//! # FoodFleet
//!
//! The core of a food delivery order desk: a persisted order store, form
//! input validation, filtered views and nearest-unpaid-order assignment.
//!
//! ## Features
//!
//! - **Single Owner Store**: [`OrderStore`](core::OrderStore) holds the orders in
//!   insertion order and rewrites them to key-value storage on every change
//! - **Ordered Validation**: Form checks run in a fixed order so the first
//!   failure is always the same
//! - **Derived Views**: Filtered views and stats are recomputed, never stored
//! - **Nearest Assignment**: Picks the closest unpaid order within a threshold,
//!   explaining why when none qualifies
//! - **Pluggable Storage**: In-memory and file-backed backends behind one trait
//! - **Configuration-Based**: Storage key and limits via YAML configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use foodfleet::prelude::*;
//!
//! let (mut desk, warning) = OrderManager::open(InMemoryStorage::new(), &FleetConfig::default());
//! if let Some(w) = warning {
//!     eprintln!("{}", w);
//! }
//!
//! desk.add(&OrderInput::new("ORD001", "Dragon Wok", "3", "2.5", false))?;
//!
//! let view = desk.apply_filter(FilterCriteria::parse("unpaid", Some("5"))?)?;
//! println!("{}", view.summary());
//!
//! let assignment = desk.assign(5.0)?;
//! println!("Deliver {}", assignment.order.order_id);
//! ```

pub mod config;
pub mod core;
pub mod demo;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Assignment, FilterCriteria, FilteredView, Order, OrderInput, OrderManager, OrderStats,
        OrderStore, PaymentStatus, SyncStatus,
    };

    // === Errors ===
    pub use crate::core::{
        AssignmentError, FleetError, OrderError, OrderField, PersistenceError,
        PersistenceOperation, ValidationError, ValidationKind,
    };

    // === Storage ===
    pub use crate::storage::{FileStorage, InMemoryStorage, KeyValueStorage, StorageError};

    // === Config ===
    pub use crate::config::{FleetConfig, ValidationLimits};
}
