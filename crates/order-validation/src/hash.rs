//! Comparison of service supplied hashes with recomputed ones.

use {
    serde_json::Value,
    std::fmt::{self, Display, Formatter},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HashMismatch {
    pub index: usize,
    pub store_no: String,
    pub customer_id: String,
    /// The hash the service returned.
    pub actual: String,
    /// The hash recomputed from the order's fields.
    pub expected: String,
}

impl Display for HashMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            index,
            store_no,
            customer_id,
            actual,
            expected,
        } = self;
        write!(
            f,
            "$[{index}] storeNo={store_no} customerId={customer_id} actual={actual} expected={expected}"
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{} of the returned orders have a hash that does not match their contents", .mismatches.len())]
pub struct HashMismatchError {
    pub mismatches: Vec<HashMismatch>,
}

/// Recomputes the hash of every order and reports all mismatches together.
pub fn verify_order_hashes(orders: &[Value]) -> Result<(), HashMismatchError> {
    let text = |order: &Value, key: &str| {
        order
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let mismatches = orders
        .iter()
        .enumerate()
        .filter_map(|(index, order)| {
            let expected = order_hash::compute_order_hash(order);
            let actual = text(order, "hash");
            tracing::debug!(index, %actual, %expected, "recomputed order hash");
            (actual != expected).then(|| HashMismatch {
                index,
                store_no: text(order, "storeNo"),
                customer_id: text(order, "customerId"),
                actual,
                expected,
            })
        })
        .collect::<Vec<_>>();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(HashMismatchError { mismatches })
    }
}
