//! Validation of order service responses.
//!
//! A success response passes through three stages, each of which stops at
//! the first violation and gates the next: [`schema`], [`format`] and
//! [`consistency`]. Error responses are checked by [`error_response`] and
//! the content hashes of valid orders by [`hash`].

pub mod consistency;
pub mod error_response;
pub mod format;
pub mod hash;
pub mod schema;

pub use {
    consistency::{ConsistencyError, OrdersExpectation},
    error_response::{expect_error_code, is_error_response, validate_error_response},
    format::FormatError,
    hash::{HashMismatch, HashMismatchError, verify_order_hashes},
    schema::SchemaError,
};
use {model::Order, serde_json::Value};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaError),
    #[error("format violation: {0}")]
    Format(#[from] FormatError),
    #[error("consistency violation: {0}")]
    Consistency(#[from] ConsistencyError),
}

/// Validates a decoded `getOrders` success response against what the
/// request lets us expect and returns the parsed orders.
pub fn validate_orders_response(
    response: &Value,
    expectation: &OrdersExpectation,
) -> Result<Vec<Order>, ValidationError> {
    let mask = expectation
        .bill_status_mask
        .map(consistency::expected_mask)
        .transpose()?;

    let orders = schema::parse_orders(response)?;
    for (index, order) in orders.iter().enumerate() {
        format::check_order(order, index)?;
    }
    consistency::check_orders(&orders, expectation, mask)?;

    tracing::debug!(orders = orders.len(), "orders response is valid");
    Ok(orders)
}
