//! Core module containing the order model and the logic operating on it

pub mod assignment;
pub mod error;
pub mod filter;
pub mod order;
pub mod service;
pub mod stats;
pub mod store;
pub mod validation;

pub use assignment::{Assignment, select_nearest_unpaid};
pub use error::{
    AssignmentError, FleetError, OrderError, OrderField, PersistenceError, PersistenceOperation,
    ValidationError, ValidationKind,
};
pub use filter::{FilterCriteria, FilteredView, PaymentStatus, apply_filters, sort_for_display};
pub use order::{Order, OrderInput};
pub use service::OrderManager;
pub use stats::{OrderStats, compute_stats};
pub use store::{OrderStore, SyncStatus};
pub use validation::validate_order_input;
