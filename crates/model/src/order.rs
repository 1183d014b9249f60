//! Records returned by the `getOrders` operation and the error object returned
//! by either operation.

use {
    crate::bill_status::{BillStatusError, BillStatusFlag},
    serde_json::{Map, Value, json},
};

/// A retrieved order.
///
/// Fields the contract does not name are kept in `extra` so that newer
/// service versions that add fields stay readable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Order {
    pub hash: String,
    pub store_no: String,
    pub customer_id: String,
    pub entry_time: String,
    /// Unchecked; a valid response carries a single [`BillStatusFlag`].
    bill_status: i64,
    pub items: Vec<OrderItem>,
    pub extra: Map<String, Value>,
}

impl Order {
    /// An order without items. `bill_status` is taken as received so that a
    /// violating value can still be reported.
    pub fn new(
        hash: String,
        store_no: String,
        customer_id: String,
        entry_time: String,
        bill_status: i64,
    ) -> Self {
        Self {
            hash,
            store_no,
            customer_id,
            entry_time,
            bill_status,
            ..Default::default()
        }
    }

    pub fn bill_status_flag(&self) -> Result<BillStatusFlag, BillStatusError> {
        BillStatusFlag::new(self.bill_status)
    }

    /// The `billStatus` as received, for diagnostics only.
    pub fn raw_bill_status(&self) -> i64 {
        self.bill_status
    }

    /// The store prefix embedded in the customer id, if the id is long
    /// enough to carry one.
    pub fn customer_store_prefix(&self) -> Option<&str> {
        self.customer_id.get(..2)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderItem {
    pub order_time: String,
    pub menu_id: String,
    pub unit_price: i64,
    pub tax_rate: i64,
    pub order_qty: i64,
    pub offer_qty: i64,
    /// Carried by the service but not part of the order hash.
    pub category_id: Option<String>,
    pub extra: Map<String, Value>,
}

/// The error object returned instead of an orders array. Recognized by the
/// presence of the `errorCode` key, independent of the HTTP status.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    pub details: Option<Map<String, Value>>,
}

impl ErrorResponse {
    /// Key whose presence marks a decoded object as an error response.
    pub const ERROR_CODE_KEY: &'static str = "errorCode";

    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// The wire form. `details` is left out when absent.
    pub fn to_json(&self) -> Value {
        let mut json = json!({
            "errorCode": self.error_code,
            "message": self.message,
        });
        if let Some(details) = &self.details {
            json["details"] = Value::Object(details.clone());
        }
        json
    }
}
