//! Typed error handling for the order desk
//!
//! Every fallible operation of the core returns one of these types, so a
//! presentation layer can match on the exact failure instead of parsing
//! strings.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: A form field failed one of the ordered input checks
//! - [`OrderError`]: Store-level conflicts (duplicate id, unknown id)
//! - [`AssignmentError`]: No order could be handed to a courier
//! - [`PersistenceError`]: Reading or writing the persisted collection failed
//!
//! # Example
//!
//! ```rust,ignore
//! match manager.assign(5.0) {
//!     Ok(assignment) => println!("Deliver {}", assignment.order.order_id),
//!     Err(FleetError::Assignment(AssignmentError::NoEligibleOrder {
//!         closest_unpaid_distance: Some(d),
//!         ..
//!     })) => println!("Closest unpaid order is {} KM away", d),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// The umbrella error type of the crate
#[derive(Debug, Clone, PartialEq)]
pub enum FleetError {
    /// Input validation errors
    Validation(ValidationError),

    /// Order store errors
    Order(OrderError),

    /// Assignment errors
    Assignment(AssignmentError),

    /// Persistence errors
    Persistence(PersistenceError),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::Validation(e) => write!(f, "{}", e),
            FleetError::Order(e) => write!(f, "{}", e),
            FleetError::Assignment(e) => write!(f, "{}", e),
            FleetError::Persistence(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FleetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetError::Validation(e) => Some(e),
            FleetError::Order(e) => Some(e),
            FleetError::Assignment(e) => Some(e),
            FleetError::Persistence(e) => Some(e),
        }
    }
}

/// Serializable error payload for presentation layers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FleetError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FleetError::Validation(e) => e.error_code(),
            FleetError::Order(e) => e.error_code(),
            FleetError::Assignment(e) => e.error_code(),
            FleetError::Persistence(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            FleetError::Validation(e) => Some(serde_json::json!({
                "field": e.field.as_str(),
            })),
            FleetError::Order(
                OrderError::DuplicateId { order_id } | OrderError::NotFound { order_id },
            ) => Some(serde_json::json!({ "orderId": order_id })),
            FleetError::Assignment(AssignmentError::NoEligibleOrder {
                max_distance,
                closest_unpaid_distance,
            }) => Some(serde_json::json!({
                "maxDistance": max_distance,
                "closestUnpaidDistance": closest_unpaid_distance,
            })),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// The input field a [`ValidationError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    OrderId,
    RestaurantName,
    ItemCount,
    DeliveryDistance,
    /// Distance threshold given to the filter or the assignment
    MaxDistance,
}

impl OrderField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::OrderId => "orderId",
            OrderField::RestaurantName => "restaurantName",
            OrderField::ItemCount => "itemCount",
            OrderField::DeliveryDistance => "deliveryDistance",
            OrderField::MaxDistance => "maxDistance",
        }
    }

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            OrderField::OrderId => "Order ID",
            OrderField::RestaurantName => "Restaurant Name",
            OrderField::ItemCount => "Number of Items",
            OrderField::DeliveryDistance => "Delivery Distance",
            OrderField::MaxDistance => "Maximum distance",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which check a field failed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationKind {
    /// Field is empty
    Required,
    /// Text shorter than `min` characters
    TooShort { min: usize },
    /// Numeric text does not parse to a finite number
    NotANumber,
    /// Number below the inclusive minimum
    BelowMinimum { min: f64 },
    /// Number above the inclusive maximum
    AboveMaximum { max: f64 },
    /// Number must be strictly greater than zero
    NotPositive,
}

/// A single field validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: OrderField,
    pub kind: ValidationKind,
    /// Human-readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: OrderField, kind: ValidationKind) -> Self {
        let label = field.label();
        let message = match kind {
            ValidationKind::Required => format!("{} is required!", label),
            ValidationKind::TooShort { min } => {
                format!("{} must be at least {} characters long!", label, min)
            }
            ValidationKind::NotANumber => format!("{} must be a valid number!", label),
            ValidationKind::BelowMinimum { min } => format!("{} must be at least {}!", label, min),
            ValidationKind::AboveMaximum { max } => {
                if field == OrderField::DeliveryDistance {
                    format!("{} cannot exceed {} KM!", label, max)
                } else {
                    format!("{} cannot exceed {}!", label, max)
                }
            }
            ValidationKind::NotPositive => format!("{} must be greater than 0!", label),
        };

        Self {
            field,
            kind,
            message,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ValidationKind::Required => "FIELD_REQUIRED",
            ValidationKind::TooShort { .. } => "FIELD_TOO_SHORT",
            ValidationKind::NotANumber => "FIELD_NOT_A_NUMBER",
            ValidationKind::BelowMinimum { .. } => "FIELD_BELOW_MINIMUM",
            ValidationKind::AboveMaximum { .. } => "FIELD_ABOVE_MAXIMUM",
            ValidationKind::NotPositive => "FIELD_NOT_POSITIVE",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for FleetError {
    fn from(err: ValidationError) -> Self {
        FleetError::Validation(err)
    }
}

// =============================================================================
// Order Errors
// =============================================================================

/// Errors raised by the order store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// An order with the same id (ignoring case) already exists
    DuplicateId { order_id: String },

    /// No order with this exact id
    NotFound { order_id: String },

    /// Operation requires an empty store
    StoreNotEmpty { count: usize },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::DuplicateId { order_id } => {
                write!(
                    f,
                    "Order ID '{}' already exists! Please use a unique Order ID.",
                    order_id
                )
            }
            OrderError::NotFound { order_id } => write!(f, "Order '{}' not found!", order_id),
            OrderError::StoreNotEmpty { count } => write!(
                f,
                "{} orders already exist. Clear all orders first to load demo data.",
                count
            ),
        }
    }
}

impl std::error::Error for OrderError {}

impl OrderError {
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::DuplicateId { .. } => "DUPLICATE_ORDER_ID",
            OrderError::NotFound { .. } => "ORDER_NOT_FOUND",
            OrderError::StoreNotEmpty { .. } => "STORE_NOT_EMPTY",
        }
    }
}

impl From<OrderError> for FleetError {
    fn from(err: OrderError) -> Self {
        FleetError::Order(err)
    }
}

// =============================================================================
// Assignment Errors
// =============================================================================

/// Reasons no order could be assigned
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentError {
    /// Orders exist, but none is unpaid within the threshold
    NoEligibleOrder {
        max_distance: f64,
        /// Minimum distance among unpaid orders; `None` when every order is paid
        closest_unpaid_distance: Option<f64>,
    },

    /// The store is empty
    NoOrdersExist,
}

impl AssignmentError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AssignmentError::NoEligibleOrder { .. } => "NO_ELIGIBLE_ORDER",
            AssignmentError::NoOrdersExist => "NO_ORDERS_EXIST",
        }
    }

    /// Explanation suitable for a result panel
    pub fn details(&self) -> String {
        match self {
            AssignmentError::NoEligibleOrder {
                closest_unpaid_distance: None,
                ..
            } => "All orders are already paid. No delivery assignment needed.".to_string(),
            AssignmentError::NoEligibleOrder {
                max_distance,
                closest_unpaid_distance: Some(closest),
            } => format!(
                "No unpaid orders within {} KM. Closest unpaid order is {} KM away.",
                max_distance, closest
            ),
            AssignmentError::NoOrdersExist => {
                "Please add some orders first before assigning delivery.".to_string()
            }
        }
    }
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentError::NoEligibleOrder { .. } => {
                write!(f, "No order available: {}", self.details())
            }
            AssignmentError::NoOrdersExist => {
                write!(f, "No orders available: {}", self.details())
            }
        }
    }
}

impl std::error::Error for AssignmentError {}

impl From<AssignmentError> for FleetError {
    fn from(err: AssignmentError) -> Self {
        FleetError::Assignment(err)
    }
}

// =============================================================================
// Persistence Errors
// =============================================================================

/// Direction of the failed persistence call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOperation {
    Read,
    Write,
}

impl fmt::Display for PersistenceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceOperation::Read => f.write_str("read"),
            PersistenceOperation::Write => f.write_str("write"),
        }
    }
}

/// Reading or writing the persisted order collection failed
///
/// A write failure leaves the in-memory store mutated; a read failure resets
/// the store to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceError {
    pub operation: PersistenceOperation,
    pub key: String,
    pub message: String,
}

impl PersistenceError {
    pub fn read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: PersistenceOperation::Read,
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: PersistenceOperation::Write,
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self.operation {
            PersistenceOperation::Read => "PERSISTENCE_READ_FAILED",
            PersistenceOperation::Write => "PERSISTENCE_WRITE_FAILED",
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            PersistenceOperation::Read => write!(
                f,
                "Could not load saved orders from '{}': {}",
                self.key, self.message
            ),
            PersistenceOperation::Write => write!(
                f,
                "Could not save orders to '{}': {}",
                self.key, self.message
            ),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<PersistenceError> for FleetError {
    fn from(err: PersistenceError) -> Self {
        FleetError::Persistence(err)
    }
}
