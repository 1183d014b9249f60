//! Canonical serialization and hashing of a retrieved order.
//!
//! The service identifies every order by the SHA-256 of a canonical string:
//!
//! ```text
//! v1|<storeNo>|<customerId>|<entryTime>|<itemsJoined>
//! ```
//!
//! where `itemsJoined` is the `;`-joined list of
//! `orderTime,menuId,unitPrice,taxRate,orderQty,offerQty` for each item after
//! sorting the items by `(orderTime, menuId, unitPrice, orderQty)`. The
//! `categoryId` of an item is not part of the hash.
//!
//! Hashing works on the decoded JSON exactly as received so that `null`
//! values, missing keys and unknown fields are treated the same way the
//! service treats them.

use {
    serde_json::Value,
    sha2::{Digest, Sha256},
    std::borrow::Cow,
};

/// Prefix of the canonical string, identifying this version of the rules.
pub const CANONICAL_VERSION: &str = "v1";

const ITEM_FIELDS: [&str; 6] = [
    "orderTime",
    "menuId",
    "unitPrice",
    "taxRate",
    "orderQty",
    "offerQty",
];

const ITEM_SORT_FIELDS: [&str; 4] = ["orderTime", "menuId", "unitPrice", "orderQty"];

/// Computes the 64 character lowercase hex hash of an order.
pub fn compute_order_hash(order: &Value) -> String {
    sha256_hex(canonical_string(order).as_bytes())
}

/// Builds the string that [`compute_order_hash`] hashes.
pub fn canonical_string(order: &Value) -> String {
    let store_no = normalize(order.get("storeNo"));
    let customer_id = normalize(order.get("customerId"));
    let entry_time = normalize(order.get("entryTime"));
    let items_joined = sorted_items(order)
        .into_iter()
        .map(|item| {
            ITEM_FIELDS
                .iter()
                .map(|field| normalize(item.get(field)))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(";");

    format!("{CANONICAL_VERSION}|{store_no}|{customer_id}|{entry_time}|{items_joined}")
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Items in canonical order. A missing or `null` item list is empty. The
/// sort is stable, so items with identical sort keys keep their relative
/// input order.
fn sorted_items(order: &Value) -> Vec<&Value> {
    let items = match order.get("items") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    let mut keyed = items
        .iter()
        .map(|item| (ITEM_SORT_FIELDS.map(|field| normalize(item.get(field))), item))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// 2^53, above which not every integer has an `f64` representation.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Renders a scalar the way the canonical string expects it.
fn normalize(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::Bool(true)) => Cow::Borrowed("true"),
        Some(Value::Bool(false)) => Cow::Borrowed("false"),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(Value::Number(number)) => Cow::Owned(match number.as_f64() {
            // Integral floats (`500.0`) render like the integer they encode,
            // as long as that integer is exact.
            Some(float)
                if number.is_f64() && float.fract() == 0.0 && float.abs() < MAX_EXACT_FLOAT =>
            {
                (float as i64).to_string()
            }
            _ => number.to_string(),
        }),
        Some(other) => Cow::Owned(other.to_string()),
    }
}
