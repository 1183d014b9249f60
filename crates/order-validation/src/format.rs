//! Field level pattern and range checks on schema valid orders.

use {
    crate::schema::Path,
    model::{Order, OrderItem},
    regex::Regex,
    std::sync::LazyLock,
};

static HASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-f]{64}$").unwrap());
static STORE_NO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());
static CUSTOMER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{4}$").unwrap());
// ASCII digits only: range checks compare timestamps as strings.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});
static MENU_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[FD][0-9]{3}$").unwrap());

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid {field}: {value:?} (expected {expected})")]
pub struct FormatError {
    /// Full location of the field, e.g. `$[2].items[0].menuId`.
    pub field: String,
    pub value: String,
    pub expected: &'static str,
}

/// Checks the order at position `index` of a response. Stops at the first
/// violation.
pub fn check_order(order: &Order, index: usize) -> Result<(), FormatError> {
    let path = Path::root().index(index);

    matches(&path, "storeNo", &order.store_no, &STORE_NO, "2 uppercase letters")?;
    matches(
        &path,
        "customerId",
        &order.customer_id,
        &CUSTOMER_ID,
        "2 uppercase letters followed by 4 digits",
    )?;
    matches(&path, "hash", &order.hash, &HASH, "64 lowercase hex characters")?;
    matches(
        &path,
        "entryTime",
        &order.entry_time,
        &TIMESTAMP,
        "YYYY-MM-DDTHH:MM:SS",
    )?;
    if order.bill_status_flag().is_err() {
        return Err(FormatError {
            field: path.key("billStatus").to_string(),
            value: order.raw_bill_status().to_string(),
            expected: "one of 1, 2, 4, 8",
        });
    }

    for (item_index, item) in order.items.iter().enumerate() {
        check_item(item, &path.key("items").index(item_index))?;
    }
    Ok(())
}

fn check_item(item: &OrderItem, path: &Path) -> Result<(), FormatError> {
    matches(
        path,
        "orderTime",
        &item.order_time,
        &TIMESTAMP,
        "YYYY-MM-DDTHH:MM:SS",
    )?;
    matches(path, "menuId", &item.menu_id, &MENU_ID, "F or D followed by 3 digits")?;
    at_least(path, "orderQty", item.order_qty, 1, ">= 1")?;
    at_least(path, "offerQty", item.offer_qty, 0, ">= 0")?;
    Ok(())
}

fn matches(
    path: &Path,
    field: &str,
    value: &str,
    pattern: &Regex,
    expected: &'static str,
) -> Result<(), FormatError> {
    if pattern.is_match(value) {
        return Ok(());
    }
    Err(FormatError {
        field: path.key(field).to_string(),
        value: value.to_string(),
        expected,
    })
}

fn at_least(
    path: &Path,
    field: &str,
    value: i64,
    minimum: i64,
    expected: &'static str,
) -> Result<(), FormatError> {
    if value >= minimum {
        return Ok(());
    }
    Err(FormatError {
        field: path.key(field).to_string(),
        value: value.to_string(),
        expected,
    })
}
