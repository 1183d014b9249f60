//! Cross-field and request/response consistency rules.

use {
    crate::schema::Path,
    model::{BillStatusMask, GetOrders, Order},
};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("{path}: storeNo {store_no:?} does not match the prefix of customerId {customer_id:?}")]
    StorePrefixMismatch {
        path: String,
        store_no: String,
        customer_id: String,
    },
    #[error("customerId {expected:?} was requested but {count} orders were returned")]
    MultipleOrdersForCustomer { expected: String, count: usize },
    #[error("customerId mismatch: expected {expected:?}, actual {actual:?}")]
    CustomerIdMismatch { expected: String, actual: String },
    #[error("invalid expected billStatus mask {0} (must be 1..=15)")]
    InvalidExpectedMask(i64),
    #[error("{path}: billStatus {bill_status} does not match mask {mask}")]
    BillStatusOutsideMask {
        path: String,
        bill_status: i64,
        mask: BillStatusMask,
    },
    #[error("{path}: entryTime {entry_time:?} is outside [{from_time}, {to_time}]")]
    EntryTimeOutOfRange {
        path: String,
        entry_time: String,
        from_time: String,
        to_time: String,
    },
    #[error("errorCode mismatch: expected {expected:?}, actual {actual:?}")]
    ErrorCodeMismatch { expected: String, actual: String },
}

/// What the request that produced a response lets us expect of it. Every
/// rule is only applied when its expectation is set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrdersExpectation {
    pub customer_id: Option<String>,
    /// Raw mask as sent; validated before any order is checked against it.
    pub bill_status_mask: Option<i64>,
    pub from_time: Option<String>,
    pub to_time: Option<String>,
}

impl From<&GetOrders> for OrdersExpectation {
    fn from(request: &GetOrders) -> Self {
        Self {
            customer_id: request.customer_id.clone(),
            bill_status_mask: request.bill_status.map(|mask| i64::from(mask.bits())),
            from_time: Some(request.from_time.clone()),
            to_time: Some(request.to_time.clone()),
        }
    }
}

pub fn expected_mask(mask: i64) -> Result<BillStatusMask, ConsistencyError> {
    BillStatusMask::new(mask).map_err(|_| ConsistencyError::InvalidExpectedMask(mask))
}

/// Applies all rules to format valid orders. `mask` is the already validated
/// form of `expectation.bill_status_mask`.
pub fn check_orders(
    orders: &[Order],
    expectation: &OrdersExpectation,
    mask: Option<BillStatusMask>,
) -> Result<(), ConsistencyError> {
    for (index, order) in orders.iter().enumerate() {
        check_store_prefix(order, index)?;
    }
    if let Some(expected) = &expectation.customer_id {
        check_customer(orders, expected)?;
    }
    if let Some(mask) = mask {
        check_bill_status(orders, mask)?;
    }
    if let (Some(from_time), Some(to_time)) = (&expectation.from_time, &expectation.to_time) {
        check_entry_time_range(orders, from_time, to_time)?;
    }
    Ok(())
}

/// The first two characters of `customerId` identify the store.
pub fn check_store_prefix(order: &Order, index: usize) -> Result<(), ConsistencyError> {
    if order.customer_store_prefix() == Some(order.store_no.as_str()) {
        return Ok(());
    }
    Err(ConsistencyError::StorePrefixMismatch {
        path: Path::root().index(index).to_string(),
        store_no: order.store_no.clone(),
        customer_id: order.customer_id.clone(),
    })
}

/// A customer scoped query returns at most that customer's single order.
pub fn check_customer(orders: &[Order], expected: &str) -> Result<(), ConsistencyError> {
    match orders {
        [] => Ok(()),
        [order] if order.customer_id == expected => Ok(()),
        [order] => Err(ConsistencyError::CustomerIdMismatch {
            expected: expected.to_string(),
            actual: order.customer_id.clone(),
        }),
        _ => Err(ConsistencyError::MultipleOrdersForCustomer {
            expected: expected.to_string(),
            count: orders.len(),
        }),
    }
}

/// Every order's single status bit must be one of the bits requested.
pub fn check_bill_status(orders: &[Order], mask: BillStatusMask) -> Result<(), ConsistencyError> {
    for (index, order) in orders.iter().enumerate() {
        match order.bill_status_flag() {
            Ok(flag) if mask.contains(flag) => continue,
            _ => {
                return Err(ConsistencyError::BillStatusOutsideMask {
                    path: Path::root().index(index).key("billStatus").to_string(),
                    bill_status: order.raw_bill_status(),
                    mask,
                });
            }
        }
    }
    Ok(())
}

/// Inclusive range check on `entryTime`. Comparing the raw strings is exact
/// because the timestamp format is fixed width, zero padded and carries no
/// zone or fractional seconds.
pub fn check_entry_time_range(
    orders: &[Order],
    from_time: &str,
    to_time: &str,
) -> Result<(), ConsistencyError> {
    for (index, order) in orders.iter().enumerate() {
        let entry_time = order.entry_time.as_str();
        if !(from_time..=to_time).contains(&entry_time) {
            return Err(ConsistencyError::EntryTimeOutOfRange {
                path: Path::root().index(index).key("entryTime").to_string(),
                entry_time: order.entry_time.clone(),
                from_time: from_time.to_string(),
                to_time: to_time.to_string(),
            });
        }
    }
    Ok(())
}
